pub mod storage;
pub mod task;
pub mod time;
pub mod timer;
