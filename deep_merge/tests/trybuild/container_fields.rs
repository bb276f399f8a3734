//! Trybuild fixture covering every container the derive can nest.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use deep_merge::{DeepMerge, merge};

#[derive(Clone, Debug, Default, DeepMerge)]
struct Leaf {
    #[deep_merge(rename = "id")]
    leaf_id: u64,
}

#[derive(Clone, Debug, DeepMerge)]
struct Everything {
    text: String,
    path: PathBuf,
    timeout: Duration,
    flag: bool,
    ch: char,
    ratio: f64,
    list: Vec<Leaf>,
    map: HashMap<String, Leaf>,
    sorted: BTreeMap<u32, Vec<String>>,
    boxed: Box<Leaf>,
    shared: Arc<Leaf>,
    node: Option<Rc<RefCell<Leaf>>>,
    json: serde_json::Value,
    toml: toml::Value,
    unit: (),
}

fn main() {
    let mut dst = Everything {
        text: String::new(),
        path: PathBuf::new(),
        timeout: Duration::ZERO,
        flag: false,
        ch: '\0',
        ratio: 0.0,
        list: Vec::new(),
        map: HashMap::new(),
        sorted: BTreeMap::new(),
        boxed: Box::default(),
        shared: Arc::default(),
        node: None,
        json: serde_json::Value::Null,
        toml: toml::Value::Boolean(false),
        unit: (),
    };
    let src = Everything {
        text: "text".into(),
        list: vec![Leaf { leaf_id: 1 }],
        node: Some(Rc::new(RefCell::new(Leaf { leaf_id: 2 }))),
        ..dst.clone()
    };
    assert!(merge(&mut dst, &src, "id").is_ok());
    assert_eq!(dst.text, "text");
    assert_eq!(dst.list.len(), 1);
}
