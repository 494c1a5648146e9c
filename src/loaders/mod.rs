pub mod obj;

pub use obj::{load_obj_file, LoadStatus, LoadedModel, ModelLoad};
