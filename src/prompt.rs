use crate::image_utils::jpeg_data_url;
use crate::models::completion::{ChatMessage, CompletionRequest, ContentPart, ImageUrl, MessageContent};

/// Instruction sent alongside every product photo
///
/// The model answers in the catalogue's Spanish field vocabulary, which is what
/// [`crate::models::product::Product`] reads.
pub const ANALYSIS_PROMPT: &str = "Analiza la imagen, dame la respuesta en un json que tenga los datos \
referencia, nombre, marca, descripcion, precio, numeroDisponible y departamento. \
Usa una referencia con la marca y algo corto. Precio y numero disponible son enteros, \
en caso de no poder saberlo pon 1";

/// Assemble the completion request for one image
///
/// Produces a single `user` message whose parts are `[image, text]`, in that
/// order. Some providers are sensitive to part order, so it must not change.
/// The model name is passed through unchecked.
pub fn build_request(model: &str, instruction: &str, encoded_image: &str) -> CompletionRequest {
    let image = ContentPart::ImageUrl {
        image_url: ImageUrl {
            detail: "auto".to_string(),
            url: jpeg_data_url(encoded_image),
        },
    };
    let text = ContentPart::Text {
        text: instruction.to_string(),
    };

    CompletionRequest {
        model: model.to_string(),
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: MessageContent::Parts(vec![image, text]),
        }],
        stream: false,
        caching_enabled: true,
    }
}
