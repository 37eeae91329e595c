//! Element catalog.

use compone::{ComponentType, ElementBuilder};

/// Catalog entry: a tag and whether it is self-closing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementInfo {
    pub tag: &'static str,
    pub self_closing: bool,
}

macro_rules! catalog {
    (@void void) => { true };
    (@void) => { false };
    ($($name:ident => $tag:literal $(($void:ident))?),* $(,)?) => {
        $(
            #[doc = concat!("The `<", $tag, ">` element.")]
            pub fn $name() -> ComponentType {
                ElementBuilder::new($tag)
                    .self_closing(catalog!(@void $($void)?))
                    .build_unchecked()
            }
        )*

        /// Every element in the catalog, in declaration order.
        pub const CATALOG: &[ElementInfo] = &[
            $(ElementInfo { tag: $tag, self_closing: catalog!(@void $($void)?) }),*
        ];
    };
}

catalog! {
    // Main root and document metadata
    html => "html",
    body => "body",
    base => "base" (void),
    head => "head",
    link => "link" (void),
    meta => "meta" (void),
    style => "style",
    title => "title",

    // Content sectioning
    address => "address",
    article => "article",
    aside => "aside",
    footer => "footer",
    header => "header",
    h1 => "h1",
    h2 => "h2",
    h3 => "h3",
    h4 => "h4",
    h5 => "h5",
    h6 => "h6",
    main => "main",
    nav => "nav",
    section => "section",

    // Text content
    blockquote => "blockquote",
    dd => "dd",
    div => "div",
    dl => "dl",
    dt => "dt",
    figcaption => "figcaption",
    figure => "figure",
    hr => "hr" (void),
    li => "li",
    menu => "menu",
    ol => "ol",
    p => "p",
    pre => "pre",
    ul => "ul",

    // Inline text semantics
    a => "a",
    abbr => "abbr",
    b => "b",
    bdi => "bdi",
    bdo => "bdo",
    br => "br" (void),
    cite => "cite",
    code => "code",
    data => "data",
    dfn => "dfn",
    em => "em",
    i => "i",
    kbd => "kbd",
    mark => "mark",
    q => "q",
    rp => "rp",
    rt => "rt",
    ruby => "ruby",
    s => "s",
    samp => "samp",
    small => "small",
    span => "span",
    strong => "strong",
    sub => "sub",
    sup => "sup",
    time => "time",
    u => "u",
    var => "var",
    wbr => "wbr" (void),

    // Image and multimedia
    area => "area" (void),
    audio => "audio",
    img => "img" (void),
    map => "map",
    track => "track" (void),
    video => "video",

    // Embedded content
    embed => "embed" (void),
    iframe => "iframe",
    object => "object",
    picture => "picture",
    portal => "portal",
    source => "source" (void),

    // SVG and MathML
    svg => "svg",
    math => "math",

    // Scripting
    canvas => "canvas",
    noscript => "noscript",
    script => "script",

    // Demarcating edits
    del => "del",
    ins => "ins",

    // Table content
    caption => "caption",
    col => "col" (void),
    colgroup => "colgroup",
    table => "table",
    tbody => "tbody",
    td => "td",
    tfoot => "tfoot",
    th => "th",
    thead => "thead",
    tr => "tr",

    // Forms
    button => "button",
    datalist => "datalist",
    fieldset => "fieldset",
    form => "form",
    input => "input" (void),
    label => "label",
    legend => "legend",
    meter => "meter",
    optgroup => "optgroup",
    option => "option",
    output => "output",
    progress => "progress",
    select => "select",
    textarea => "textarea",

    // Interactive elements
    details => "details",
    dialog => "dialog",
    summary => "summary",

    // Web components
    slot => "slot",
    template => "template",
}

/// `<button type="button">`
pub fn button_button() -> ComponentType {
    typed_button("ButtonButton", "button")
}

/// `<button type="submit">`
pub fn submit_button() -> ComponentType {
    typed_button("SubmitButton", "submit")
}

/// `<button type="reset">`
pub fn reset_button() -> ComponentType {
    typed_button("ResetButton", "reset")
}

fn typed_button(name: &str, kind: &str) -> ComponentType {
    ElementBuilder::new("button")
        .named(name)
        .preset("type", kind)
        .build_unchecked()
}

/// Look up a catalog element by tag.
pub fn by_tag(tag: &str) -> Option<ComponentType> {
    CATALOG
        .iter()
        .find(|info| info.tag == tag)
        .map(|info| {
            ElementBuilder::new(info.tag)
                .self_closing(info.self_closing)
                .build_unchecked()
        })
}
