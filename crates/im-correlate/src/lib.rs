//! Email to author name correlation
//!
//! Given the email addresses and the author names seen in one dataset, this
//! crate infers which name most probably owns each address:
//! - Name feature extraction (ASCII folding, truncations, reversals,
//!   short-prefix permutations, initials)
//! - Five-pass weighted matching against the email local-part
//! - Best-owner selection per email
//!
//! ```
//! let owners = im_correlate::correlate_names(
//!     &["t3hirano@nodai.ac.jp", "tb1@nibmg.ac.in"],
//!     &["Takashi HIRANO", "Taniya Bardhan"],
//! )
//! .unwrap();
//! assert_eq!(owners["t3hirano@nodai.ac.jp"], "Takashi HIRANO");
//! assert_eq!(owners["tb1@nibmg.ac.in"], "Taniya Bardhan");
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod features;
pub mod input;
pub mod normalize;
pub mod owner;
pub mod scorer;

pub use config::{ConsumptionMode, CorrelationConfig, PassWeights, Strictness};
pub use engine::{correlate, correlate_names, explain, CorrelateOptions, CorrelationReport};
pub use error::{ConfigError, CorrelateError, Result};
pub use features::NameFeatures;
pub use input::{load_list, parse_list};
pub use normalize::{fold_to_ascii, local_part, sanitize_local_part, split_words};
pub use owner::{Owner, OwnerRegistry};
pub use scorer::{score_pair, Pass, PassOutcome, ScoreBreakdown, WorkingCopy};
