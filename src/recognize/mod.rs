pub mod client;
pub mod protocol;

pub use client::{RecognitionClient, RecognizeError};
pub use protocol::{decode_reply_image, encode_data_uri, RecognitionReply, RecognitionRequest};
