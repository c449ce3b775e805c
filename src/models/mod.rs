pub mod article;
pub mod digest;
pub mod region;

pub use article::{join_prompt_blocks, NewsArticle, MISSING_SNIPPET};
pub use digest::{
    capitalize, Digest, DigestRequest, NewsQuery, TrendingQuery, TrendingResponse,
};
pub use region::{parse_region, Region, RegionResponse};
