pub mod completion;
pub mod product;
