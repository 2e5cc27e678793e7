//! Icon markup collaborator.

/// Icons used by the notes page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Plus,
    Close,
    Github,
    MoreHorizontal,
    Edit,
    Trash,
}

impl Icon {
    /// Feather icon name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Plus => "plus",
            Self::Close => "x",
            Self::Github => "github",
            Self::MoreHorizontal => "more-horizontal",
            Self::Edit => "edit",
            Self::Trash => "trash",
        }
    }
}

/// Pure mapping from an icon to its markup.
pub trait IconRenderer {
    fn icon_markup(&self, icon: Icon) -> String;
}

/// Emits `<i data-feather>` placeholders replaced client-side by feather.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatherIcons;

impl IconRenderer for FeatherIcons {
    fn icon_markup(&self, icon: Icon) -> String {
        format!("<i data-feather='{}'></i>", icon.name())
    }
}
