//! HTTP request handlers

mod health;
mod helpers;
mod nodes;
mod trees;

pub use health::health_check;
pub use nodes::{
    create_node, create_tree_node, delete_node, move_node, move_tree_node, rename_node,
};
pub use trees::{
    create_tree, full_flat_list, full_indented_view, list_trees, tree_indented, tree_nodes,
    verify_tree,
};
