use compone::{
    content, current_parent, current_scope, element, props, void_element, ComponeError, Component,
    ComponentType, SafeString, Signature, Value,
};
use pretty_assertions::assert_eq;

fn with_children() -> ComponentType {
    let div = element("div").unwrap();
    ComponentType::function("WithChildren", Signature::new().children(), move |args| {
        Ok(Value::Component(div.bind(args.children().cloned())?))
    })
    .unwrap()
}

#[test]
fn component_cannot_overwrite_children_with_item_access() {
    let comp = with_children().bind("Hello").unwrap();

    assert!(matches!(
        comp.bind("Another Children"),
        Err(ComponeError::Rebinding { .. })
    ));
}

#[test]
fn item_access_does_not_affect_original_children() {
    let comp1 = with_children().bind("Children").unwrap();
    let mut comp2 = comp1.copy();
    comp2 += "Another Children";

    assert!(!comp1.ptr_eq(&comp2));
    assert_eq!(comp1.render().unwrap(), "<div>Children</div>");
    assert_eq!(comp2.render().unwrap(), "<div>Another Children</div>");
}

#[test]
fn children_accessor() {
    let comp = with_children().bind("Hello").unwrap();

    assert_eq!(comp.children(), vec![Value::from("Hello")]);
}

#[test]
fn children_accessible_for_children_components() {
    let sub = with_children().bind("Hello").unwrap();
    let comp = with_children().bind(&sub).unwrap();

    assert_eq!(comp.children(), vec![Value::Component(sub.clone())]);
    let first = comp.children()[0].as_component().cloned().unwrap();
    assert_eq!(first.children(), vec![Value::from("Hello")]);
    assert_eq!(comp.render().unwrap(), "<div><div>Hello</div></div>");
    assert_eq!(first.render().unwrap(), "<div>Hello</div>");
}

fn layout() -> ComponentType {
    let html = element("html").unwrap();
    let head = element("head").unwrap();
    let title = element("title").unwrap();
    let body = element("body").unwrap();
    ComponentType::function(
        "Layout",
        Signature::new().param("title").children(),
        move |args| {
            let page = html.bind(content![
                head.bind(title.bind(args.value("title")?.clone())?)?,
                body.bind(args.children().cloned())?,
            ])?;
            Ok(Value::Component(page))
        },
    )
    .unwrap()
}

fn unord_list() -> ComponentType {
    let ul = element("ul").unwrap();
    let li = element("li").unwrap();
    ComponentType::function("UnordList", Signature::new().param("elems"), move |args| {
        let items = args
            .value("elems")?
            .as_list()
            .unwrap_or_default()
            .iter()
            .map(|elem| li.bind(elem.clone()).map(Value::Component))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Component(ul.bind(items)?))
    })
    .unwrap()
}

#[test]
fn quickstart_page() {
    let p = element("p").unwrap();
    let div = element("div").unwrap();
    let br = void_element("br").unwrap();

    let page = layout()
        .with_props(props! { "title" => "Page title" })
        .unwrap()
        .lazy();
    page.bind(content![
        p.bind("Page title").unwrap(),
        "<div>HTML string</div>",
        unord_list()
            .call(vec![Value::from(vec!["György", "Dóri"])], Default::default())
            .unwrap(),
        div.bind(content!["<br>", br.create().unwrap()]).unwrap(),
    ])
    .unwrap();

    assert_eq!(
        page.render().unwrap(),
        concat!(
            "<html><head><title>Page title</title></head><body>",
            "<p>Page title</p>",
            "&lt;div&gt;HTML string&lt;/div&gt;",
            "<ul><li>György</li><li>Dóri</li></ul>",
            "<div>&lt;br&gt;<br /></div>",
            "</body></html>"
        )
    );
}

#[test]
fn scoped_blocks_build_document_order() {
    let ul = element("ul").unwrap();
    let li = element("li").unwrap();

    let list = ul.create().unwrap();
    list.scope(|_| {
        for text in ["one", "two", "three"] {
            let item = li.create().unwrap();
            item.scope(|item| item.push(text));
        }
    });

    assert_eq!(
        list.render().unwrap(),
        "<ul><li>one</li><li>two</li><li>three</li></ul>"
    );
}

#[test]
fn scoped_blocks_mix_with_explicit_attachment() {
    let div = element("div").unwrap();
    let span = element("span").unwrap();

    let mut outer = div.create().unwrap();
    outer.scope(|_| {
        let inner = span.create().unwrap();
        let _guard = inner.enter();
        inner.push("a");
    });
    outer += SafeString::trusted("<hr />");

    assert_eq!(outer.render().unwrap(), "<div><span>a</span><hr /></div>");
}

#[test]
fn stored_blocks_reused_elsewhere_do_not_leak() {
    let div = element("div").unwrap();

    let first = div.create().unwrap();
    let second = div.create().unwrap();
    let child = div.create().unwrap();

    let first_guard = first.enter();
    let child_guard = child.enter();
    let second_guard = second.enter();
    // child's block closes while second's body is running
    drop(child_guard);
    drop(second_guard);
    drop(first_guard);

    assert!(first.children().is_empty());
    assert!(second.children().is_empty());
    assert_eq!(current_scope(), 0);
    assert!(current_parent().is_none());
}

#[test]
fn stored_block_does_not_capture_later_top_level_blocks() {
    let div = element("div").unwrap();
    let outer = div.create().unwrap();
    let child = div.create().unwrap();
    let later = div.create().unwrap();

    let mut stored = None;
    outer.scope(|_| stored = Some(child.enter()));
    drop(stored);
    later.scope(|later| later.push("x"));

    assert!(current_parent().is_none());
    assert!(outer.children().is_empty());
    assert_eq!(later.render().unwrap(), "<div>x</div>");
}

#[test]
fn replace_and_merge_properties() {
    let a = element("a").unwrap();
    let link = a.with_props(props! { "href" => "/" }).unwrap();

    let replaced = link.replace(props! { "href" => "/docs" }).unwrap();
    let merged = link.merge(props! { "target" => "_blank" }).unwrap();

    assert_eq!(link.props(), &props! { "href" => "/" });
    assert_eq!(replaced.props(), &props! { "href" => "/docs" });
    assert_eq!(merged.props(), &props! { "href" => "/", "target" => "_blank" });
    assert_eq!(
        merged.bind("docs").unwrap(),
        Value::Safe(SafeString::trusted(r#"<a href="/" target="_blank">docs</a>"#))
    );
}

#[test]
fn repeated_component_renders_n_times() {
    let hr: Component = void_element("hr").unwrap().create().unwrap();

    assert_eq!(hr.to_string(), "<hr />");
    assert_eq!((hr * 3).to_string(), "<hr /><hr /><hr />");
}
