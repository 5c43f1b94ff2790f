pub mod concurrent;
pub mod evaluate;
pub mod game;
pub mod hand_move;
pub mod input_handler;
pub mod move_generator;
pub mod position;
pub mod rules;
pub mod searcher;
