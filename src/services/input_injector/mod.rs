mod virtual_device;
mod r#trait;

pub use self::r#trait::{create_input_sink, InputSink};
