pub mod ask_assistant;
