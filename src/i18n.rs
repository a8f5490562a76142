//! Display-language collaborator and the bilingual notification catalog.
//!
//! Every user-facing message the stores emit is looked up here in the
//! language that is current at emission time, so a language switch takes
//! effect on the very next notification.

use std::sync::{Arc, RwLock};

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Arabic,
    English,
}

/// Shared handle to the active display language.
///
/// Cloned into every store; reads happen at notification time rather than
/// at store construction.
#[derive(Debug, Clone)]
pub struct LanguagePreference {
    current: Arc<RwLock<Language>>,
}

impl LanguagePreference {
    pub fn new(language: Language) -> Self {
        Self {
            current: Arc::new(RwLock::new(language)),
        }
    }

    pub fn get(&self) -> Language {
        *self.current.read().unwrap()
    }

    pub fn set(&self, language: Language) {
        *self.current.write().unwrap() = language;
    }
}

/// Keys for every notification the favorites and interests stores produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    SignInRequired,
    FavoritesLoadFailed,
    ProjectFavoriteAdded,
    ProjectFavoriteAddFailed,
    ProjectFavoriteRemoved,
    ProjectFavoriteRemoveFailed,
    UnitFavoriteAdded,
    UnitFavoriteAddFailed,
    UnitFavoriteRemoved,
    UnitFavoriteRemoveFailed,
    InterestsLoadFailed,
    InterestedProjectRemoved,
    InterestedProjectRemoveFailed,
    InterestedUnitRemoved,
    InterestedUnitRemoveFailed,
}

impl Notice {
    /// The localized message text for this notice
    pub fn text(&self, language: Language) -> &'static str {
        match language {
            Language::Arabic => self.arabic(),
            Language::English => self.english(),
        }
    }

    fn arabic(&self) -> &'static str {
        match self {
            Self::SignInRequired => "يرجى تسجيل الدخول أولاً",
            Self::FavoritesLoadFailed => "تعذر تحميل المفضلة",
            Self::ProjectFavoriteAdded => "تمت إضافة المشروع إلى المفضلة",
            Self::ProjectFavoriteAddFailed => "تعذرت إضافة المشروع إلى المفضلة",
            Self::ProjectFavoriteRemoved => "تمت إزالة المشروع من المفضلة",
            Self::ProjectFavoriteRemoveFailed => "تعذرت إزالة المشروع من المفضلة",
            Self::UnitFavoriteAdded => "تمت إضافة الوحدة إلى المفضلة",
            Self::UnitFavoriteAddFailed => "تعذرت إضافة الوحدة إلى المفضلة",
            Self::UnitFavoriteRemoved => "تمت إزالة الوحدة من المفضلة",
            Self::UnitFavoriteRemoveFailed => "تعذرت إزالة الوحدة من المفضلة",
            Self::InterestsLoadFailed => "تعذر تحميل الاهتمامات",
            Self::InterestedProjectRemoved => "تمت إزالة المشروع من اهتماماتك",
            Self::InterestedProjectRemoveFailed => "تعذرت إزالة المشروع من اهتماماتك",
            Self::InterestedUnitRemoved => "تمت إزالة الوحدة من اهتماماتك",
            Self::InterestedUnitRemoveFailed => "تعذرت إزالة الوحدة من اهتماماتك",
        }
    }

    fn english(&self) -> &'static str {
        match self {
            Self::SignInRequired => "Please sign in first",
            Self::FavoritesLoadFailed => "Could not load your favorites",
            Self::ProjectFavoriteAdded => "Project added to favorites",
            Self::ProjectFavoriteAddFailed => "Could not add project to favorites",
            Self::ProjectFavoriteRemoved => "Project removed from favorites",
            Self::ProjectFavoriteRemoveFailed => "Could not remove project from favorites",
            Self::UnitFavoriteAdded => "Unit added to favorites",
            Self::UnitFavoriteAddFailed => "Could not add unit to favorites",
            Self::UnitFavoriteRemoved => "Unit removed from favorites",
            Self::UnitFavoriteRemoveFailed => "Could not remove unit from favorites",
            Self::InterestsLoadFailed => "Could not load your interests",
            Self::InterestedProjectRemoved => "Project removed from your interests",
            Self::InterestedProjectRemoveFailed => "Could not remove project from your interests",
            Self::InterestedUnitRemoved => "Unit removed from your interests",
            Self::InterestedUnitRemoveFailed => "Could not remove unit from your interests",
        }
    }
}
