pub mod best_first;
pub mod breadth_first;
pub mod depth_first;
pub mod greedy;
pub mod iterative_deepening;
