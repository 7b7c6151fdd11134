mod arena;
mod handle;
mod node;
mod raw_rb_map;

pub(crate) use handle::Handle;
pub(crate) use node::Side;
pub(crate) use raw_rb_map::RawRbMap;
