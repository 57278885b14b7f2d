//! Localized UI strings.

use crate::directive::ContainerKind;

/// UI string table, selected from the site language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    /// Chinese (`zh`, `zh-CN`, `zh-TW`, ...).
    #[default]
    Chinese,
    /// Any other language.
    English,
}

impl Locale {
    /// Select the string table for a language tag.
    ///
    /// ```
    /// use ink_renderer::Locale;
    ///
    /// assert_eq!(Locale::from_language("zh-CN"), Locale::Chinese);
    /// assert_eq!(Locale::from_language("en-US"), Locale::English);
    /// ```
    #[must_use]
    pub fn from_language(language: &str) -> Self {
        if language.to_ascii_lowercase().starts_with("zh") {
            Self::Chinese
        } else {
            Self::English
        }
    }

    /// Default title for a container kind.
    #[must_use]
    pub fn container_title(self, kind: ContainerKind) -> &'static str {
        match (self, kind) {
            (Self::Chinese, ContainerKind::Tip) => "提示",
            (Self::Chinese, ContainerKind::Warning) => "警告",
            (Self::Chinese, ContainerKind::Danger) => "危险",
            (Self::Chinese, ContainerKind::Info) => "信息",
            (Self::Chinese, ContainerKind::Details) => "详情",
            (Self::English, ContainerKind::Tip) => "Tip",
            (Self::English, ContainerKind::Warning) => "Warning",
            (Self::English, ContainerKind::Danger) => "Danger",
            (Self::English, ContainerKind::Info) => "Info",
            (Self::English, ContainerKind::Details) => "Details",
        }
    }

    /// Player title when the `title` attribute is missing.
    #[must_use]
    pub fn unknown_track(self) -> &'static str {
        match self {
            Self::Chinese => "未知曲目",
            Self::English => "Unknown track",
        }
    }

    /// Tooltip of the player loop button.
    #[must_use]
    pub fn loop_label(self) -> &'static str {
        match self {
            Self::Chinese => "循环",
            Self::English => "Loop",
        }
    }
}
