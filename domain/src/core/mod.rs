pub mod error;
pub mod paging;
pub mod string;
pub mod vocabulary;
