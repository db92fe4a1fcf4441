pub mod paths;
pub mod verdict;
