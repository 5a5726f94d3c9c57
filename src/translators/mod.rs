mod markup;
mod outline;

pub use markup::Markup;
pub use outline::Outline;
