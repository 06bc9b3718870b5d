/// Top-level view the embedding shell should render.
///
/// Transitions are fixed: `Loading` resolves to `Login` or `Workspace` once
/// session restoration finishes, `Login` and `Register` swap on explicit
/// toggle, successful auth enters `Workspace`, and logout returns to
/// `Login`. There is no error state; failures are reported in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Loading,
    Login,
    Register,
    Workspace,
}

impl View {
    /// Swap between the two unauthenticated views. Any other state is
    /// returned unchanged.
    pub fn toggled_auth(self) -> View {
        match self {
            View::Login => View::Register,
            View::Register => View::Login,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_view_is_loading() {
        assert_eq!(View::default(), View::Loading);
    }

    #[test]
    fn test_auth_toggle_swaps_login_and_register() {
        assert_eq!(View::Login.toggled_auth(), View::Register);
        assert_eq!(View::Register.toggled_auth(), View::Login);
    }

    #[test]
    fn test_auth_toggle_is_noop_elsewhere() {
        assert_eq!(View::Loading.toggled_auth(), View::Loading);
        assert_eq!(View::Workspace.toggled_auth(), View::Workspace);
    }
}
