pub mod linkedin;

pub use linkedin::{submit_search, LinkedInClient};
