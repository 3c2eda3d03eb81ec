pub mod link_header;
pub mod page_walker;
pub mod transport;

pub use link_header::{parse_link_header, PageRelationSet};
pub use page_walker::{decode_body, strip_guard, Fetcher, PageWalker, RetryPolicy, GUARD_TOKEN};
pub use transport::{HttpTransport, RawResponse, Transport};
