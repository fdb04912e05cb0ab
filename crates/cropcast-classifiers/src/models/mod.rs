pub mod decision_tree;
pub mod forest;
