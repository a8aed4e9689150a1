//! Augmented SBOM policy.
//!
//! Oracle GraalVM for JDK 24 and later can embed a software bill of materials
//! in the image when given `--enable-sbom`. Whether to turn this on, and
//! whether an augmented SBOM should be generated for the build, depends on an
//! optional user override, the toolchain, and whether the flag was already
//! passed as a raw build argument:
//!
//! | override | flag present | toolchain capable | outcome                          |
//! |----------|--------------|-------------------|----------------------------------|
//! | false    | any          | any               | nothing                          |
//! | true     | any          | no                | [`ConfigError`]                  |
//! | true     | any          | yes               | flag ensured, SBOM requested     |
//! | unset    | no           | any               | nothing                          |
//! | unset    | yes          | no                | nothing                          |
//! | unset    | yes          | yes               | SBOM requested                   |
//!
//! An explicit request that cannot be honoured fails the build; a flag that
//! happens to be present on an incapable toolchain is left alone.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::args::BuildArgs;
use crate::capability::{CapabilityFacts, Edition};
use crate::error::ConfigError;

/// Compiler flag enabling embedded SBOM generation.
pub const ENABLE_SBOM_FLAG: &str = "--enable-sbom";

/// Name of the user-facing option.
pub const AUGMENTED_SBOM_OPTION: &str = "augmentedSBOM";

/// Lowest JDK version whose native-image supports augmented SBOMs.
pub const MIN_SBOM_JDK_VERSION: u32 = 24;

/// The user's `augmentedSBOM` setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum SbomOverride {
  #[default]
  Unset,
  Enabled,
  Disabled,
}

impl From<Option<bool>> for SbomOverride {
  fn from(value: Option<bool>) -> Self {
    match value {
      None => SbomOverride::Unset,
      Some(true) => SbomOverride::Enabled,
      Some(false) => SbomOverride::Disabled,
    }
  }
}

impl From<SbomOverride> for Option<bool> {
  fn from(value: SbomOverride) -> Self {
    match value {
      SbomOverride::Unset => None,
      SbomOverride::Enabled => Some(true),
      SbomOverride::Disabled => Some(false),
    }
  }
}

/// What the policy decided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SbomDecision {
  /// Whether the caller should generate an augmented SBOM.
  pub requested: bool,
  /// Whether [`ENABLE_SBOM_FLAG`] was appended by this decision.
  pub flag_added: bool,
}

impl SbomDecision {
  const NONE: Self = Self {
    requested: false,
    flag_added: false,
  };
}

/// Why a toolchain cannot produce an augmented SBOM.
fn unsupported(facts: &CapabilityFacts) -> Option<ConfigError> {
  if !facts.is_oracle() {
    return Some(ConfigError::UnsupportedEdition {
      option: AUGMENTED_SBOM_OPTION,
      required: Edition::Oracle,
      detected: facts.edition,
    });
  }
  if facts.major_version < MIN_SBOM_JDK_VERSION {
    return Some(ConfigError::UnsupportedVersion {
      option: AUGMENTED_SBOM_OPTION,
      edition: Edition::Oracle,
      required: MIN_SBOM_JDK_VERSION,
      detected: facts.major_version,
    });
  }
  None
}

/// Whether the toolchain described by `facts` can produce an augmented SBOM.
pub fn supported(facts: &CapabilityFacts) -> bool {
  unsupported(facts).is_none()
}

/// Decide whether an augmented SBOM is produced, appending
/// [`ENABLE_SBOM_FLAG`] to `args` when an explicit request needs it.
///
/// # Errors
///
/// Returns a [`ConfigError`] when the override is explicitly enabled and the
/// toolchain is not Oracle GraalVM or its JDK is older than
/// [`MIN_SBOM_JDK_VERSION`]. `args` is left untouched in that case.
pub fn decide(
  sbom_override: SbomOverride,
  facts: &CapabilityFacts,
  args: &mut BuildArgs,
) -> Result<SbomDecision, ConfigError> {
  match sbom_override {
    SbomOverride::Disabled => Ok(SbomDecision::NONE),
    SbomOverride::Enabled => {
      if let Some(e) = unsupported(facts) {
        return Err(e);
      }

      let flag_added = args.push_unless_present(ENABLE_SBOM_FLAG);
      if flag_added {
        info!(
          flag = ENABLE_SBOM_FLAG,
          option = AUGMENTED_SBOM_OPTION,
          "automatically added build argument because the option was set to true, an SBOM will be embedded in the image"
        );
      }

      Ok(SbomDecision {
        requested: true,
        flag_added,
      })
    }
    SbomOverride::Unset => {
      if !args.contains_fragment(ENABLE_SBOM_FLAG) {
        return Ok(SbomDecision::NONE);
      }

      if let Some(reason) = unsupported(facts) {
        info!(
          flag = ENABLE_SBOM_FLAG,
          reason = %reason,
          "build argument present but toolchain cannot produce an augmented SBOM, skipping"
        );
        return Ok(SbomDecision::NONE);
      }

      Ok(SbomDecision {
        requested: true,
        flag_added: false,
      })
    }
  }
}
