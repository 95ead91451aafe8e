use jostle::{Error, GraphFeed, MemoryFeed};

#[test]
fn from_edges_lists_nodes_in_first_seen_order() {
    let feed = MemoryFeed::from_edges([("b", "c"), ("a", "b")]);
    assert_eq!(feed.nodes().collect::<Vec<_>>(), vec!["b", "c", "a"]);
    assert_eq!(feed.edges("b").collect::<Vec<_>>(), vec!["c"]);
    assert_eq!(feed.edges("a").collect::<Vec<_>>(), vec!["b"]);
    assert_eq!(feed.edges("c").count(), 0);
    assert_eq!(feed.edges("missing").count(), 0);
}

#[test]
fn add_node_is_idempotent() {
    let mut feed = MemoryFeed::new();
    feed.add_node("a").add_node("a").add_edge("a", "b");
    assert_eq!(feed.node_count(), 2);
    feed.add_node("a");
    assert_eq!(feed.edges("a").collect::<Vec<_>>(), vec!["b"]);
}

#[test]
fn json_documents_keep_key_order() {
    let feed = MemoryFeed::from_json_str(r#"{"z": ["a"], "a": [], "m": ["z", "a"]}"#)
        .expect("valid feed");
    assert_eq!(feed.nodes().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    assert_eq!(feed.edges("m").collect::<Vec<_>>(), vec!["z", "a"]);

    let json = feed.to_json_string().expect("serialise");
    assert_eq!(json, r#"{"z":["a"],"a":[],"m":["z","a"]}"#);
    assert_eq!(MemoryFeed::from_json_str(&json).expect("reparse"), feed);
}

#[test]
fn malformed_json_is_reported() {
    let err = MemoryFeed::from_json_str(r#"{"a": "b"}"#).unwrap_err();
    assert!(matches!(err, Error::Json(_)), "got {err:?}");
}
