pub mod path;
pub mod semantic;
pub mod token;
pub mod types;

pub use path::{DottedPath, is_reference, reference_target};
pub use semantic::SemanticType;
pub use token::{ResolvedToken, ThemeMode, TokenSummary};
pub use types::{Color, Dimension, ROOT_FONT_SIZE, format_number, parse_font_weight};
