use std::fmt;
use std::str::FromStr;

/// Model names the completion endpoint is known to serve
///
/// The request builder accepts any string; this list only drives config
/// warnings and the `models` command. Rejecting unknown names is the
/// endpoint's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedModel {
    InnovationGpt4oMini,
    InnovationGpt4o,
    O4Mini,
    O1,
    O1Mini,
    O3Mini,
    O1Preview,
    Gpt5Chat,
    Gpt41,
    Gpt41Mini,
    Gpt5,
    Gpt5Codex,
    Gpt5Mini,
    Gpt5Nano,
    Gpt41Nano,
    Claude35Sonnet,
    Claude4Sonnet,
    Claude37Sonnet,
    Claude35Haiku,
    Claude45Sonnet,
}

impl SupportedModel {
    pub const ALL: [SupportedModel; 20] = [
        Self::InnovationGpt4oMini,
        Self::InnovationGpt4o,
        Self::O4Mini,
        Self::O1,
        Self::O1Mini,
        Self::O3Mini,
        Self::O1Preview,
        Self::Gpt5Chat,
        Self::Gpt41,
        Self::Gpt41Mini,
        Self::Gpt5,
        Self::Gpt5Codex,
        Self::Gpt5Mini,
        Self::Gpt5Nano,
        Self::Gpt41Nano,
        Self::Claude35Sonnet,
        Self::Claude4Sonnet,
        Self::Claude37Sonnet,
        Self::Claude35Haiku,
        Self::Claude45Sonnet,
    ];

    /// Model used for product analysis unless configured otherwise
    pub const DEFAULT: SupportedModel = SupportedModel::Claude4Sonnet;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InnovationGpt4oMini => "Innovation-gpt4o-mini",
            Self::InnovationGpt4o => "Innovation-gpt4o",
            Self::O4Mini => "o4-mini",
            Self::O1 => "o1",
            Self::O1Mini => "o1-mini",
            Self::O3Mini => "o3-mini",
            Self::O1Preview => "o1-preview",
            Self::Gpt5Chat => "gpt-5-chat",
            Self::Gpt41 => "gpt-4.1",
            Self::Gpt41Mini => "gpt-4.1-mini",
            Self::Gpt5 => "gpt-5",
            Self::Gpt5Codex => "gpt-5-codex",
            Self::Gpt5Mini => "gpt-5-mini",
            Self::Gpt5Nano => "gpt-5-nano",
            Self::Gpt41Nano => "gpt-4.1-nano",
            Self::Claude35Sonnet => "claude-3-5-sonnet",
            Self::Claude4Sonnet => "claude-4-sonnet",
            Self::Claude37Sonnet => "claude-3-7-sonnet",
            Self::Claude35Haiku => "claude-3-5-haiku",
            Self::Claude45Sonnet => "claude-4-5-sonnet",
        }
    }

    pub fn is_supported(name: &str) -> bool {
        name.parse::<SupportedModel>().is_ok()
    }
}

impl fmt::Display for SupportedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupportedModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| format!("unknown model: {}", s))
    }
}
