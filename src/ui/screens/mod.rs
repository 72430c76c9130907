pub mod quest_board;
