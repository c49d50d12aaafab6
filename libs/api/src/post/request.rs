use serde::Deserialize;

/// Fields submitted by the create and edit forms. A missing field is empty.
#[derive(Deserialize, Debug)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}
