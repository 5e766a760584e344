//! In-page helper object and the wire format of calls into it.
//!
//! The bridge lives at `window.__formfill`. It keeps a table of element handles
//! (handle `0` is the document) and answers every call with an object carrying a
//! `status` field, so evaluation never yields `undefined`.

use serde::Deserialize;
use serde_json::Value;

pub(crate) const BRIDGE_VERSION: u32 = 1;

pub(crate) const BRIDGE_SOURCE: &str = r#"(() => {
  const VERSION = 1;
  if (window.__formfill && window.__formfill.version === VERSION) {
    return { installed: true, version: VERSION };
  }
  const nodes = [document];
  const ids = new WeakMap();
  const handle = (el) => {
    if (!el) return null;
    let id = ids.get(el);
    if (id === undefined) {
      id = nodes.length;
      nodes.push(el);
      ids.set(el, id);
    }
    return id;
  };
  const node = (h) => {
    const el = nodes[h];
    if (!el || (h !== 0 && !el.isConnected)) throw { stale: true, handle: h };
    return el;
  };
  const attr = (el, name) => (el.hasAttribute(name) ? el.getAttribute(name) : null);
  const setterFor = (el) => {
    const proto = el instanceof HTMLTextAreaElement
      ? HTMLTextAreaElement.prototype
      : el instanceof HTMLSelectElement
        ? HTMLSelectElement.prototype
        : HTMLInputElement.prototype;
    return Object.getOwnPropertyDescriptor(proto, "value").set;
  };
  const event = (name) => {
    switch (name) {
      case "mousedown":
      case "mouseup":
      case "click":
        return new MouseEvent(name, { bubbles: true, cancelable: true, view: window });
      default:
        return new Event(name, { bubbles: true });
    }
  };
  const labelFor = (el) => {
    if (el.labels && el.labels.length > 0) return el.labels[0];
    return el.closest ? el.closest("label") : null;
  };
  const calls = {
    formControls: () => Array.from(document.querySelectorAll("input, textarea, select")).map(handle),
    inspect: (h) => {
      const el = node(h);
      const tag = el.tagName.toLowerCase();
      return {
        tag,
        inputType: tag === "input" ? (el.type || "text").toLowerCase() : null,
        id: el.id || null,
        name: attr(el, "name"),
        placeholder: attr(el, "placeholder"),
        classes: Array.from(el.classList),
        value: typeof el.value === "string" ? el.value : "",
        checked: !!el.checked,
        disabled: !!el.disabled,
        readonly: !!el.readOnly,
        required: !!el.required,
        ariaRequired: el.getAttribute("aria-required") === "true",
        visible: el.offsetParent !== null,
        min: attr(el, "min"),
        max: attr(el, "max"),
      };
    },
    closest: (h, selector) => handle(node(h).closest(selector)),
    queryAll: (h, selector) => Array.from(node(h).querySelectorAll(selector)).map(handle),
    text: (h) => {
      const el = node(h);
      return (el.innerText !== undefined ? el.innerText : el.textContent || "").trim();
    },
    labelText: (h) => {
      const label = labelFor(node(h));
      const text = label ? label.innerText.trim() : "";
      return text.length > 0 ? text : null;
    },
    options: (h) => Array.from(node(h).options || []).map((o) => ({
      value: o.value,
      text: o.text,
      disabled: !!o.disabled,
    })),
    selectIndex: (h, index) => {
      const el = node(h);
      if (!el.options || index >= el.options.length) throw new RangeError("option index out of range");
      el.selectedIndex = index;
      return true;
    },
    dispatch: (h, name) => node(h).dispatchEvent(event(name)),
    focus: (h) => { node(h).focus(); return true; },
    blur: (h) => { node(h).blur(); return true; },
    setValue: (h, value, platform) => {
      const el = node(h);
      if (platform) {
        setterFor(el).call(el, value);
      } else {
        el.value = value;
      }
      return true;
    },
  };
  window.__formfill = {
    version: VERSION,
    call(method, args) {
      const fn = calls[method];
      if (!fn) throw new TypeError("unknown bridge method " + method);
      return fn(...args);
    },
  };
  return { installed: true, version: VERSION };
})()"#;

/// Expression invoking `method` with `args` on the installed bridge.
pub(crate) fn invocation(method: &str, args: &[Value]) -> String {
    let method = Value::String(method.to_string());
    let args = Value::Array(args.to_vec());
    format!(
        r#"(() => {{
  const bridge = window.__formfill;
  if (!bridge || bridge.version !== {BRIDGE_VERSION}) return {{ status: "bridge-missing" }};
  try {{
    const value = bridge.call({method}, {args});
    return {{ status: "ok", value: value === undefined ? null : value }};
  }} catch (err) {{
    if (err && err.stale) return {{ status: "stale", handle: err.handle }};
    return {{ status: "error", kind: err && err.name ? err.name : "Error", message: String(err && err.message ? err.message : err) }};
  }}
}})()"#
    )
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub(crate) enum BridgeReply {
    Ok {
        #[serde(default)]
        value: Value,
    },
    Stale {
        handle: u64,
    },
    Error {
        #[serde(default)]
        kind: String,
        #[serde(default)]
        message: String,
    },
    BridgeMissing,
}

impl BridgeReply {
    pub(crate) fn decode(raw: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(raw)
    }
}
