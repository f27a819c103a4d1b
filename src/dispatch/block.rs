use crate::dom::{Animation, DomPatch};
use crate::messages::{BlockSection, Fragment};
use crate::pages::{PageConfig, Target};

/// `has_<section>`: the block has content for this section, reveal its panel
pub(super) fn show_section(config: &PageConfig, section: BlockSection) -> Vec<DomPatch> {
    vec![DomPatch::SetVisible {
        target: config.resolve(&Target::Section(section)),
        visible: true,
        animation: config.animation,
    }]
}

pub(super) fn append_item(
    config: &PageConfig,
    section: BlockSection,
    fragment: &Fragment,
) -> Vec<DomPatch> {
    vec![DomPatch::Append {
        target: config.resolve(&Target::Container(section)),
        html: fragment.html.clone(),
    }]
}

/// The displayed block changed: empty every section and hide the panels
/// until the new block announces what it has.
pub(super) fn clear_details(config: &PageConfig) -> Vec<DomPatch> {
    let mut patches = Vec::with_capacity(BlockSection::ALL.len() * 2);

    for section in BlockSection::ALL {
        patches.push(DomPatch::Clear {
            target: config.resolve(&Target::Container(section)),
        });
    }

    for section in BlockSection::ALL {
        patches.push(DomPatch::SetVisible {
            target: config.resolve(&Target::Section(section)),
            visible: false,
            animation: Animation::None,
        });
    }

    patches
}
