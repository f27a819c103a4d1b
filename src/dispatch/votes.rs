use crate::dom::{Animation, DomPatch};
use crate::messages::Fragment;
use crate::pages::{PageConfig, Target};

/// `loading` / `done` bracket a batch of current-vote rows
pub(super) fn loading(config: &PageConfig, active: bool) -> Vec<DomPatch> {
    vec![DomPatch::SetVisible {
        target: config.resolve(&Target::LoadingIndicator),
        visible: active,
        animation: Animation::None,
    }]
}

pub(super) fn current_grant(config: &PageConfig, fragment: &Fragment) -> Vec<DomPatch> {
    vec![DomPatch::Append {
        target: config.resolve(&Target::CurrentGrants),
        html: fragment.html.clone(),
    }]
}

pub(super) fn current_motion(config: &PageConfig, fragment: &Fragment) -> Vec<DomPatch> {
    vec![DomPatch::Append {
        target: config.resolve(&Target::CurrentMotions),
        html: fragment.html.clone(),
    }]
}
