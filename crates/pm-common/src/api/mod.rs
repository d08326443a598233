pub mod match_request;
pub mod match_response;
pub mod profile_request;

pub use match_request::{MatchRequest, SearchRequest};
pub use match_response::{MatchResponse, ProfileResult};
pub use profile_request::{IngestResponse, NewProfileRequest};
