//! Combined text + audio orchestration
//!
//! The text stage is mandatory and its errors abort the request. The audio
//! stage is best effort: its failure is reported next to the text result.

use super::{AudioGenerationService, TextGenerationService};
use crate::models::{
    AudioGenerationRequest, AudioOutcome, AudioSettings, CombinedGenerationRequest,
    CombinedGenerationResponse, TextGenerationRequest, Voice,
};
use crate::utils::error::{AppError, AppResult};
use tracing::{info, warn};

/// Runs the text stage, then the optional audio stage, strictly in sequence
#[derive(Debug, Clone)]
pub struct CombinedGenerator {
    text: TextGenerationService,
    audio: AudioGenerationService,
}

impl CombinedGenerator {
    pub fn new(text: TextGenerationService, audio: AudioGenerationService) -> Self {
        Self { text, audio }
    }

    pub async fn generate(&self, request: CombinedGenerationRequest) -> AppResult<CombinedGenerationResponse> {
        let prompt = match request.prompt {
            Some(prompt) if !prompt.is_empty() => prompt,
            _ => return Err(AppError::Validation("Prompt is required".to_string())),
        };

        let text = self
            .text
            .generate(&TextGenerationRequest {
                prompt,
                model: request.model,
            })
            .await?;

        let audio = if request.generate_audio {
            self.audio_stage(&text.text, request.voice_id, request.audio_settings.as_ref())
                .await
        } else {
            AudioOutcome::Skipped
        };

        Ok(CombinedGenerationResponse { text, audio })
    }

    async fn audio_stage(&self, text: &str, voice: Option<Voice>, settings: Option<&AudioSettings>) -> AudioOutcome {
        let request = AudioGenerationRequest::new(text).with_voice(voice);
        let request = match settings {
            Some(settings) => match settings.apply(request) {
                Ok(request) => request,
                Err(message) => {
                    warn!("Invalid audio settings: {}", message);
                    return AudioOutcome::Failed { message, details: None };
                }
            },
            None => request,
        };

        match self.audio.generate(&request).await {
            Ok(audio) => {
                info!("Audio stage completed: {} bytes", audio.size_bytes);
                AudioOutcome::Generated(audio)
            }
            Err(AppError::Api(e)) => {
                warn!("Audio stage failed: {} ({})", e.message, e.code);
                AudioOutcome::Failed {
                    message: e.message.clone(),
                    details: serde_json::to_string(&e).ok(),
                }
            }
            Err(e) => {
                warn!("Audio stage failed: {}", e);
                AudioOutcome::Failed {
                    message: e.to_string(),
                    details: None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AudioGenerationResponse, AudioModel, OutputFormat, TextGenerationResponse, TextModel,
        VoiceSettingsOverride,
    };
    use crate::providers::{SpeechSynthesizer, TextGenerator};
    use crate::utils::error::{ApiError, ErrorCode, Vendor};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct StubText {
        result: Result<String, ApiError>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextGenerator for StubText {
        fn name(&self) -> &str {
            "stub-text"
        }

        async fn generate_text(&self, request: &TextGenerationRequest) -> Result<TextGenerationResponse, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone().map(|text| TextGenerationResponse {
                text,
                model: request.model.unwrap_or_default(),
                usage: None,
                metadata: None,
            })
        }
    }

    struct StubSpeech {
        result: Result<Vec<u8>, ApiError>,
        seen: Mutex<Vec<AudioGenerationRequest>>,
    }

    #[async_trait]
    impl SpeechSynthesizer for StubSpeech {
        fn name(&self) -> &str {
            "stub-speech"
        }

        async fn synthesize(&self, request: &AudioGenerationRequest) -> Result<AudioGenerationResponse, ApiError> {
            self.seen.lock().unwrap().push(request.clone());
            self.result.clone().map(|bytes| {
                AudioGenerationResponse::from_bytes(
                    &bytes,
                    request.output_format.unwrap_or_default(),
                    request.voice_id.unwrap_or_default(),
                )
            })
        }
    }

    fn generator(text: Result<String, ApiError>, audio: Result<Vec<u8>, ApiError>) -> (CombinedGenerator, Arc<StubText>, Arc<StubSpeech>) {
        let text_stub = Arc::new(StubText {
            result: text,
            calls: AtomicUsize::new(0),
        });
        let speech_stub = Arc::new(StubSpeech {
            result: audio,
            seen: Mutex::new(Vec::new()),
        });
        let generator = CombinedGenerator::new(
            TextGenerationService::new(text_stub.clone()),
            AudioGenerationService::new(speech_stub.clone()),
        );
        (generator, text_stub, speech_stub)
    }

    fn request(prompt: &str, generate_audio: bool) -> CombinedGenerationRequest {
        CombinedGenerationRequest {
            prompt: Some(prompt.to_string()),
            generate_audio,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_prompt_makes_no_calls() {
        let (generator, text_stub, speech_stub) = generator(Ok("x".into()), Ok(vec![1]));

        let err = generator.generate(CombinedGenerationRequest::default()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = generator.generate(request("", true)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert_eq!(text_stub.calls.load(Ordering::SeqCst), 0);
        assert!(speech_stub.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_text_only() {
        let (generator, _, speech_stub) = generator(Ok("Once upon a time".into()), Ok(vec![1, 2]));

        let response = generator.generate(request("story", false)).await.unwrap();

        assert_eq!(response.text.text, "Once upon a time");
        assert_eq!(response.audio, AudioOutcome::Skipped);
        assert!(speech_stub.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_text_failure_propagates() {
        let upstream = ApiError::upstream(Vendor::Gemini, 401, "bad key");
        let (generator, _, speech_stub) = generator(Err(upstream.clone()), Ok(vec![1]));

        let err = generator.generate(request("story", true)).await.unwrap_err();

        match err {
            AppError::Api(e) => assert_eq!(e, upstream),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(speech_stub.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_audio_success_uses_text_output() {
        let (generator, _, speech_stub) = generator(Ok("Narrate me".into()), Ok(vec![7; 64]));
        let mut req = request("story", true);
        req.voice_id = Some(Voice::Josh);
        req.audio_settings = Some(AudioSettings {
            model_id: Some(AudioModel::TurboV2_5),
            output_format: Some(OutputFormat::Pcm22050),
            voice_settings: Some(VoiceSettingsOverride {
                style: Some(0.3),
                ..Default::default()
            }),
        });

        let response = generator.generate(req).await.unwrap();

        let audio = response.audio().unwrap();
        assert_eq!(audio.size_bytes, 64);
        assert_eq!(audio.voice_id, Voice::Josh);
        assert_eq!(audio.format, OutputFormat::Pcm22050);

        let seen = speech_stub.seen.lock().unwrap();
        assert_eq!(seen[0].text, "Narrate me");
        assert_eq!(seen[0].model_id, Some(AudioModel::TurboV2_5));
        assert_eq!(seen[0].voice_settings.unwrap().style, 0.3);
    }

    #[tokio::test]
    async fn test_audio_failure_is_reported_with_details() {
        let upstream = ApiError::upstream(Vendor::ElevenLabs, 429, "quota exceeded");
        let (generator, _, _) = generator(Ok("hello".into()), Err(upstream));

        let response = generator.generate(request("story", true)).await.unwrap();

        assert_eq!(response.text.text, "hello");
        assert!(response.audio().is_none());
        assert_eq!(response.audio_error(), Some("quota exceeded"));

        let details: ApiError = serde_json::from_str(response.audio_error_details().unwrap()).unwrap();
        assert_eq!(details.code, ErrorCode::ElevenlabsRateLimit);
        assert_eq!(details.status, 429);
    }

    #[tokio::test]
    async fn test_invalid_audio_settings_fail_audio_stage_only() {
        let (generator, _, speech_stub) = generator(Ok("hello".into()), Ok(vec![1]));
        let mut req = request("story", true);
        req.audio_settings = Some(AudioSettings {
            voice_settings: Some(VoiceSettingsOverride {
                stability: Some(2.0),
                ..Default::default()
            }),
            ..Default::default()
        });

        let response = generator.generate(req).await.unwrap();

        assert!(response.audio_error().unwrap().contains("stability"));
        assert!(response.audio_error_details().is_none());
        assert!(speech_stub.seen.lock().unwrap().is_empty());
        assert_eq!(response.text.model, TextModel::Gemini15Flash);
    }
}
