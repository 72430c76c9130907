mod all;
mod as_str;
mod from_str;
mod icon;
mod next_in_cycle;
mod sql;
