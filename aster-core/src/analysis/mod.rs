//! Analysis collaborator: hosted-model strategist with a deterministic
//! local fallback. The facade never surfaces an error to callers.

pub mod analyst;
pub mod fallback;
pub mod gemini;
pub mod prompt;
pub mod verdict;

pub use analyst::Analyst;
pub use fallback::{simulated_portfolio_review, simulated_verdict};
pub use gemini::{AnalysisError, GeminiClient, API_KEY_VAR};
pub use verdict::{
    Bias, StrategyVerdict, TimeframeAnalysis, TimeframeOutlook, TradeLevels, Verdict,
};
