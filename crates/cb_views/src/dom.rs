use std::collections::HashMap;
use cb_core::html::{Element, Node};
use tokio::sync::RwLock;

/// Mount point of the article browser.
pub const BESPOKE_MAIN: &str = "bespoke-main";
/// Sidebar of the segment browser.
pub const SEGMENT_INDEX: &str = "segment-index";
/// Annotation pane of the segment browser.
pub const THREADS_MAIN: &str = "threads-main";

pub const LOAD_FAILED: &str = "데이터를 불러오지 못했습니다.";

/// The render target: named mount points, each a `div` whose children are
/// replaced wholesale by the controllers on every navigation.
#[derive(Debug, Default)]
pub struct Document {
    pub(crate) mounts: RwLock<HashMap<String, Element>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mounts(ids: &[&str]) -> Self {
        let mounts = ids
            .iter()
            .map(|id| (id.to_string(), mount_root(id)))
            .collect();
        Self {
            mounts: RwLock::new(mounts),
        }
    }

    /// Swap the contents of a mount point for freshly built nodes.
    pub async fn replace(&self, mount: &str, children: Vec<Node>) {
        let root = mount_root(mount).children(children);
        self.mounts.write().await.insert(mount.to_string(), root);
    }

    /// Mutate a rendered mount point in place. Returns false if nothing is mounted there.
    pub async fn update<F>(&self, mount: &str, edit: F) -> bool
    where
        F: FnOnce(&mut Element),
    {
        match self.mounts.write().await.get_mut(mount) {
            Some(root) => {
                edit(root);
                true
            }
            None => false,
        }
    }

    /// Serialized mount point, including its `<div id>` wrapper.
    pub async fn html(&self, mount: &str) -> Option<String> {
        self.mounts.read().await.get(mount).map(|root| root.to_string())
    }
}

fn mount_root(id: &str) -> Element {
    Element::new("div").attr("id", id)
}

/// Inline error line used for not-found and failed loads.
pub fn error_message(text: &str) -> Node {
    Element::new("p").class("bespoke-error").text(text).into()
}
