pub mod user_quest;
