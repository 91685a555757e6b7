pub mod condition;
pub mod data;
pub mod path;
pub mod value;
