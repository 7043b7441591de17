use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PlantHealthRequest {
    #[serde(default)]
    pub image: serde_bytes::ByteBuf,
    #[serde(default)]
    pub content_type: Option<String>,
}
