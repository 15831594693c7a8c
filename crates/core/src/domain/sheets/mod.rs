pub mod a1_notation;
