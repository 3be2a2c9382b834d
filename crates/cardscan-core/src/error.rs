use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("cannot aggregate an empty character box sequence")]
    EmptyInput,

    #[error("aggregated box has inverted extent (width {width}, height {height})")]
    InvertedExtent { width: f64, height: f64 },
}
