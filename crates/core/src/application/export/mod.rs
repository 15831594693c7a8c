pub mod export_routine;
