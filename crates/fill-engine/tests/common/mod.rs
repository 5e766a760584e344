//! Page fixtures reproducing the widget library's DOM reactions.

#![allow(dead_code)]

use std::sync::Arc;

use dom_port::{DomEvent, DomTree, ElementSpec, MemoryDom, NodeRef};
use fill_engine::{EngineConfig, Orchestrator, Timings};

pub fn orchestrator(dom: &MemoryDom) -> Orchestrator {
    orchestrator_with(dom, EngineConfig::default().with_timings(Timings::immediate()))
}

pub fn orchestrator_with(dom: &MemoryDom, config: EngineConfig) -> Orchestrator {
    Orchestrator::new(Arc::new(dom.clone()), config)
}

pub fn form(tree: &mut DomTree) -> NodeRef {
    let root = tree.root();
    tree.append(root, ElementSpec::new("form"))
}

/// `.zireael-field` with a caption, holding `control`. Returns the control.
pub fn library_field(
    tree: &mut DomTree,
    parent: NodeRef,
    caption: &str,
    required: bool,
    control: ElementSpec,
) -> NodeRef {
    let mut wrapper = ElementSpec::new("div").class("zireael-field");
    if required {
        wrapper = wrapper.class("zireael-field_required");
    }
    let wrapper = tree.append(parent, wrapper);
    tree.append(
        wrapper,
        ElementSpec::new("div").class("zireael-field__label").text(caption),
    );
    tree.append(wrapper, control)
}

pub fn text_input() -> ElementSpec {
    ElementSpec::input("text").class("n2o-input").tracked()
}

pub struct Dropdown {
    pub wrapper: NodeRef,
    pub input: NodeRef,
    pub toggle: NodeRef,
}

pub const MENU_CLASS: &str = "n2o-input-select__menu";
pub const SELECTED_CLASS: &str = "n2o-input-select__selected-item";

/// Library dropdown. The toggle opens and closes the menu; the menu is only in the
/// tree while open. Single selects write the picked text and close, multi selects
/// append a selected tag and stay open.
pub fn dropdown(tree: &mut DomTree, parent: NodeRef, items: &[&str], multi: bool) -> Dropdown {
    let wrapper = tree.append(parent, ElementSpec::new("div").class("egisz-select-wrapper"));
    let input = if multi {
        tree.append(
            wrapper,
            ElementSpec::new("textarea")
                .class("n2o-inp n2o-inp--multi")
                .flag("readonly"),
        )
    } else {
        tree.append(
            wrapper,
            ElementSpec::input("text")
                .class("n2o-inp")
                .flag("readonly")
                .tracked(),
        )
    };
    let tags = tree.append(wrapper, ElementSpec::new("div").class("n2o-input-select__tags"));
    let toggle = tree.append(
        wrapper,
        ElementSpec::new("button").class("n2o-input-select__toggle"),
    );

    let items: Vec<String> = items.iter().map(|item| item.to_string()).collect();
    tree.on(toggle, DomEvent::Click, move |tree, _| {
        if let Ok(Some(menu)) = tree.query(wrapper, &format!(".{MENU_CLASS}")) {
            tree.remove(menu);
            return;
        }
        let menu = tree.append(wrapper, ElementSpec::new("div").class(MENU_CLASS));
        for text in &items {
            let item = tree.append(
                menu,
                ElementSpec::new("button").class("dropdown-item").text(text),
            );
            let text = text.clone();
            tree.on(item, DomEvent::Click, move |tree, _| {
                if multi {
                    tree.append(tags, ElementSpec::new("span").class(SELECTED_CLASS).text(&text));
                } else {
                    tree.set_value(input, &text);
                    tree.remove(menu);
                }
            });
        }
    });

    Dropdown {
        wrapper,
        input,
        toggle,
    }
}

pub fn menu_open(dom: &MemoryDom, dropdown: &Dropdown) -> bool {
    dom.read(|tree| {
        tree.query(dropdown.wrapper, &format!(".{MENU_CLASS}"))
            .ok()
            .flatten()
            .is_some()
    })
}

pub fn selected_tags(dom: &MemoryDom, dropdown: &Dropdown) -> Vec<String> {
    dom.read(|tree| {
        tree.query_all(dropdown.wrapper, &format!(".{SELECTED_CLASS}"))
            .unwrap_or_default()
            .into_iter()
            .map(|tag| tree.text(tag))
            .collect()
    })
}

pub struct LibraryCheckbox {
    pub label: NodeRef,
    pub input: NodeRef,
}

/// `label.zireael-checkbox` whose marker class follows the hidden input.
pub fn library_checkbox(tree: &mut DomTree, parent: NodeRef, checked: bool) -> LibraryCheckbox {
    let marker = if checked {
        "zireael-checkbox_checked"
    } else {
        "zireael-checkbox_unchecked"
    };
    let label = tree.append(
        parent,
        ElementSpec::new("label").class("zireael-checkbox").class(marker),
    );
    let input = tree.append(label, ElementSpec::input("checkbox").checked(checked));
    tree.append(label, ElementSpec::new("span").text("Согласие"));
    tree.on(input, DomEvent::Change, move |tree, target| {
        let checked = tree.checked(target);
        tree.remove_class(label, "zireael-checkbox_checked");
        tree.remove_class(label, "zireael-checkbox_unchecked");
        tree.add_class(
            label,
            if checked {
                "zireael-checkbox_checked"
            } else {
                "zireael-checkbox_unchecked"
            },
        );
    });
    LibraryCheckbox { label, input }
}

/// `.zireael-radio-group` with one labelled radio per option.
pub fn radio_group(tree: &mut DomTree, parent: NodeRef, name: &str, options: &[&str]) -> Vec<NodeRef> {
    let group = tree.append(parent, ElementSpec::new("div").class("zireael-radio-group"));
    options
        .iter()
        .map(|option| {
            let label = tree.append(group, ElementSpec::new("label").class("zireael-radio"));
            let input = tree.append(
                label,
                ElementSpec::input("radio").attr("name", name).attr("value", option),
            );
            tree.append(label, ElementSpec::new("span").text(option));
            input
        })
        .collect()
}

pub fn number_input(tree: &mut DomTree, parent: NodeRef, min: Option<&str>, max: Option<&str>) -> NodeRef {
    let wrapper = tree.append(parent, ElementSpec::new("div").class("n2o-input-number"));
    let mut input = ElementSpec::input("text").class("n2o-input").tracked();
    if let Some(min) = min {
        input = input.attr("min", min);
    }
    if let Some(max) = max {
        input = input.attr("max", max);
    }
    tree.append(wrapper, input)
}

/// Library date picker input; `range` selects the date-range flavour.
pub fn library_date(tree: &mut DomTree, parent: NodeRef, range: bool) -> NodeRef {
    let picker = if range {
        "zireael-date-range-picker"
    } else {
        "zireael-datepicker"
    };
    let wrapper = tree.append(parent, ElementSpec::new("div").class(picker));
    tree.append(
        wrapper,
        ElementSpec::input("text")
            .class("zireael-input")
            .flag("readonly")
            .tracked(),
    )
}

pub fn native_select(tree: &mut DomTree, parent: NodeRef, options: &[(&str, &str)]) -> NodeRef {
    let select = tree.append(parent, ElementSpec::new("select").attr("name", "region"));
    for (value, text) in options {
        tree.append(
            select,
            ElementSpec::new("option").attr("value", value).text(text),
        );
    }
    select
}
