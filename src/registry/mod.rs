pub mod scammers;

pub use scammers::ScammerRegistry;
