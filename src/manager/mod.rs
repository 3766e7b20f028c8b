pub mod spin_group;
pub mod task;
