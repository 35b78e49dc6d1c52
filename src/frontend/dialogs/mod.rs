//! Modal dialogs of the bag player
//!
//! Two dialogs exist: the player configuration form opened from the Config
//! button, and the error message shown when a bag cannot be opened. Both
//! render through [`egui::Modal`], which dims and blocks the panel behind
//! them. Escape or a click on the backdrop counts as Cancel.

use egui::{Context, Id, Ui};

/// Outcome of one frame of a dialog
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DialogAction<A> {
    /// Stay open
    #[default]
    None,
    /// Close without committing anything
    Close,
    /// Close and hand `A` to the app
    Commit(A),
}

/// Form state owned by the app while a dialog is open
pub trait DialogState: Default {
    /// Back to defaults once the dialog closes
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether the commit button may be pressed
    fn is_valid(&self) -> bool {
        true
    }
}

pub trait Dialog {
    type State: DialogState;

    /// What the dialog commits; `Infallible` for dialogs that only close
    type Action;

    type Context<'a>;

    fn title(state: &Self::State) -> &'static str;

    /// Content width in points
    fn width() -> f32 {
        320.0
    }

    fn render(
        state: &mut Self::State,
        ctx: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action>;
}

/// Render `D` as a modal while `is_open` is set
///
/// Returns the committed action on the frame the dialog commits. The state
/// is reset whenever the dialog closes.
pub fn show_dialog<D: Dialog>(
    ctx: &Context,
    is_open: &mut bool,
    state: &mut D::State,
    dialog_ctx: D::Context<'_>,
) -> Option<D::Action> {
    if !*is_open {
        return None;
    }

    let title = D::title(state);
    let response = egui::Modal::new(Id::new(title)).show(ctx, |ui| {
        ui.set_width(D::width());
        ui.heading(title);
        ui.add_space(4.0);
        D::render(state, dialog_ctx, ui)
    });

    let action = if response.should_close() {
        DialogAction::Close
    } else {
        response.inner
    };
    settle(action, is_open, state)
}

/// Apply a dialog outcome to the open flag and the form state
pub fn settle<A, S: DialogState>(
    action: DialogAction<A>,
    is_open: &mut bool,
    state: &mut S,
) -> Option<A> {
    let committed = match action {
        DialogAction::None => return None,
        DialogAction::Close => None,
        DialogAction::Commit(a) => Some(a),
    };
    *is_open = false;
    state.reset();
    committed
}

pub mod error;
pub mod player_config;

pub use error::{ErrorContext, ErrorDialog, ErrorState};
pub use player_config::{
    PlayerConfigAction, PlayerConfigContext, PlayerConfigDialog, PlayerConfigState,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Form {
        text: String,
    }

    impl DialogState for Form {}

    fn filled() -> Form {
        Form {
            text: "draft".to_string(),
        }
    }

    #[test]
    fn test_none_keeps_dialog_and_state() {
        let mut open = true;
        let mut form = filled();
        assert_eq!(settle::<u8, _>(DialogAction::None, &mut open, &mut form), None);
        assert!(open);
        assert_eq!(form, filled());
    }

    #[test]
    fn test_close_discards_form() {
        let mut open = true;
        let mut form = filled();
        assert_eq!(settle::<u8, _>(DialogAction::Close, &mut open, &mut form), None);
        assert!(!open);
        assert_eq!(form, Form::default());
    }

    #[test]
    fn test_commit_hands_out_action() {
        let mut open = true;
        let mut form = filled();
        assert_eq!(settle(DialogAction::Commit(7u8), &mut open, &mut form), Some(7));
        assert!(!open);
        assert_eq!(form, Form::default());
    }

    #[test]
    fn test_closed_dialog_renders_nothing() {
        let ctx = Context::default();
        let mut open = false;
        let mut state = ErrorState::new("t", "m");
        let _ = ctx.run(Default::default(), |ctx| {
            assert!(show_dialog::<ErrorDialog>(ctx, &mut open, &mut state, ErrorContext).is_none());
        });
        assert_eq!(state.message, "m");
    }

    #[test]
    fn test_open_dialog_waits_for_user() {
        let ctx = Context::default();
        let mut open = true;
        let mut state = PlayerConfigState {
            rate: 2.0,
            ..Default::default()
        };
        let _ = ctx.run(Default::default(), |ctx| {
            let action =
                show_dialog::<PlayerConfigDialog>(ctx, &mut open, &mut state, PlayerConfigContext);
            assert!(action.is_none());
        });
        assert!(open);
        assert_eq!(state.rate, 2.0);
    }
}
