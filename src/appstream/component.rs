// src/appstream/component.rs

//! AppStream component records

/// Kind of software an AppStream component describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComponentKind {
    #[default]
    Generic,
    DesktopApplication,
    ConsoleApplication,
    WebApplication,
    Addon,
    Font,
    Codec,
    InputMethod,
    Firmware,
    Driver,
    Localization,
    Service,
    Repository,
    OperatingSystem,
    IconTheme,
    Runtime,
    /// A type string this crate does not know about
    Unknown,
}

impl ComponentKind {
    /// Parse the `type` attribute (XML) or `Type` key (DEP-11)
    ///
    /// Accepts the legacy `desktop` alias for desktop applications.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "" | "generic" => Self::Generic,
            "desktop-application" | "desktop-app" | "desktop" => Self::DesktopApplication,
            "console-application" => Self::ConsoleApplication,
            "web-application" => Self::WebApplication,
            "addon" => Self::Addon,
            "font" => Self::Font,
            "codec" => Self::Codec,
            "inputmethod" => Self::InputMethod,
            "firmware" => Self::Firmware,
            "driver" => Self::Driver,
            "localization" => Self::Localization,
            "service" => Self::Service,
            "repository" => Self::Repository,
            "operating-system" => Self::OperatingSystem,
            "icon-theme" => Self::IconTheme,
            "runtime" => Self::Runtime,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::DesktopApplication => "desktop-application",
            Self::ConsoleApplication => "console-application",
            Self::WebApplication => "web-application",
            Self::Addon => "addon",
            Self::Font => "font",
            Self::Codec => "codec",
            Self::InputMethod => "inputmethod",
            Self::Firmware => "firmware",
            Self::Driver => "driver",
            Self::Localization => "localization",
            Self::Service => "service",
            Self::Repository => "repository",
            Self::OperatingSystem => "operating-system",
            Self::IconTheme => "icon-theme",
            Self::Runtime => "runtime",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One AppStream metadata record
///
/// A component maps to zero or more installable packages. A desktop
/// application usually names exactly one, but split packaging (`foo` +
/// `foo-data`) and per-architecture names produce several, and
/// metainfo-only components (repositories, operating systems) name none.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Component {
    /// AppStream id, e.g. `org.mozilla.firefox`
    pub id: String,
    pub kind: ComponentKind,
    pub name: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Declared package names, in declaration order
    pub package_names: Vec<String>,
    pub keywords: Vec<String>,
    pub categories: Vec<String>,
    /// Origin of the catalog this component was read from
    pub origin: Option<String>,
    pub project_license: Option<String>,
    pub developer_name: Option<String>,
    pub url_homepage: Option<String>,
    pub icon_stock: Option<String>,
}

impl Component {
    /// Create an empty component with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Builder-style helper to attach package names
    pub fn with_packages<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.package_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Builder-style helper to set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder-style helper to set the one-line summary
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// All declared package names
    pub fn package_names(&self) -> &[String] {
        &self.package_names
    }

    /// The primary (first declared) package name, if any
    pub fn package_name(&self) -> Option<&str> {
        self.package_names.first().map(String::as_str)
    }

    pub fn has_package(&self) -> bool {
        !self.package_names.is_empty()
    }

    /// Display name, falling back to the component id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Add a package name unless it is blank or already declared
    pub(crate) fn push_package(&mut self, name: &str) {
        let name = name.trim();
        if !name.is_empty() && !self.package_names.iter().any(|p| p == name) {
            self.package_names.push(name.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_name() {
        assert_eq!(ComponentKind::from_name("desktop-application"), ComponentKind::DesktopApplication);
        assert_eq!(ComponentKind::from_name("desktop"), ComponentKind::DesktopApplication);
        assert_eq!(ComponentKind::from_name("font"), ComponentKind::Font);
        assert_eq!(ComponentKind::from_name(""), ComponentKind::Generic);
        assert_eq!(ComponentKind::from_name("spaceship"), ComponentKind::Unknown);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ComponentKind::WebApplication.to_string(), "web-application");
        assert_eq!(ComponentKind::InputMethod.to_string(), "inputmethod");
    }

    #[test]
    fn test_primary_package_name() {
        let c = Component::new("org.mozilla.firefox").with_packages(["firefox", "firefox-esr"]);
        assert_eq!(c.package_name(), Some("firefox"));
        assert_eq!(c.package_names().len(), 2);
        assert!(c.has_package());

        let none = Component::new("org.example.os");
        assert_eq!(none.package_name(), None);
        assert!(!none.has_package());
    }

    #[test]
    fn test_push_package_skips_blank_and_duplicates() {
        let mut c = Component::new("org.videolan.vlc");
        c.push_package("vlc");
        c.push_package("  ");
        c.push_package("vlc");
        c.push_package(" vlc-bin ");
        assert_eq!(c.package_names(), ["vlc", "vlc-bin"]);
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let c = Component::new("org.gnome.Maps");
        assert_eq!(c.display_name(), "org.gnome.Maps");
        let c = c.with_name("Maps");
        assert_eq!(c.display_name(), "Maps");
    }
}
