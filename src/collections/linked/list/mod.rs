mod doubly_linked_list;
mod iter;
mod list;
mod node;
mod singly_linked_list;
mod sort;

pub use doubly_linked_list::*;
pub use iter::*;
pub use list::*;
pub use node::*;
pub use singly_linked_list::*;
pub(crate) use sort::*;
