use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("invalid coordinate `{value}`: expected a number or a percentage like `50%`")]
    InvalidCoordinate { value: String },
    #[error("no default style for shape category `{category}` and the override is incomplete")]
    UnknownShapeCategory { category: String },
    #[error("polygon needs at least 3 points, got {points}")]
    DegeneratePolygon { points: usize },
    #[error("canvas dimensions must be positive, got {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },
}

pub type RenderResult<T> = Result<T, RenderError>;
