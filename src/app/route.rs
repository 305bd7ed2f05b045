/// Logical pages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// Entry point; always redirects to [`Route::Login`].
    #[default]
    Entry,
    Login,
    Dashboard,
}

impl Route {
    /// Follow redirects to the page that is actually shown.
    pub const fn resolve(self) -> Self {
        match self {
            Self::Entry => Self::Login,
            other => other,
        }
    }

    pub const fn path(self) -> &'static str {
        match self {
            Self::Entry => "/",
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Entry | Self::Login => "Sign in",
            Self::Dashboard => "Dashboard",
        }
    }
}
