mod requests;

pub use requests::{constant_request, single_tier, varying_request};
