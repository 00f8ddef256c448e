//! Localized apologies for replies the model could not produce.

use crate::classify::DegradedKind;
use crate::locale::LocaleTag;
use crate::responder::FailureKind;

/// Text shown when a reachable backend reported a soft error.
pub fn degraded(kind: DegradedKind, locale: LocaleTag) -> &'static str {
    match (kind, locale) {
        (DegradedKind::ModelLoading, LocaleTag::En) => {
            "My thinking engine is still warming up. Please try again in a few seconds!"
        }
        (DegradedKind::ModelLoading, LocaleTag::Es) => {
            "Mi motor de ideas todavía se está calentando. ¡Inténtalo de nuevo en unos segundos!"
        }
        (DegradedKind::RateLimited, LocaleTag::En) => {
            "So many adventurers at once! Give me a moment and ask again."
        }
        (DegradedKind::RateLimited, LocaleTag::Es) => {
            "¡Cuántos aventureros a la vez! Dame un momento y vuelve a preguntar."
        }
        (DegradedKind::BackendError, LocaleTag::En) => {
            "Sorry, I ran into a problem while thinking about that. Could you try again?"
        }
        (DegradedKind::BackendError, LocaleTag::Es) => {
            "Lo siento, tuve un problema al pensar en eso. ¿Puedes intentarlo de nuevo?"
        }
        (DegradedKind::EmptyGeneration, LocaleTag::En) => {
            "Sorry, I could not process that message. Could you rephrase it?"
        }
        (DegradedKind::EmptyGeneration, LocaleTag::Es) => {
            "Lo siento, no pude procesar ese mensaje. ¿Podrías reformularlo?"
        }
    }
}

/// Text shown when the pipeline itself failed.
pub fn failure(kind: FailureKind, locale: LocaleTag) -> &'static str {
    match (kind, locale) {
        (FailureKind::Authentication, LocaleTag::En) => {
            "Sorry, my connection to the assistant service is misconfigured right now."
        }
        (FailureKind::Authentication, LocaleTag::Es) => {
            "Lo siento, mi conexión con el servicio del asistente está mal configurada ahora mismo."
        }
        (FailureKind::RateLimited, LocaleTag::En) => {
            "I am getting too many questions right now. Please try again in a minute."
        }
        (FailureKind::RateLimited, LocaleTag::Es) => {
            "Estoy recibiendo demasiadas preguntas ahora mismo. Inténtalo de nuevo en un minuto."
        }
        (FailureKind::ServerError, LocaleTag::En) => {
            "The assistant service is having trouble. Please try again later."
        }
        (FailureKind::ServerError, LocaleTag::Es) => {
            "El servicio del asistente tiene problemas. Inténtalo más tarde."
        }
        (FailureKind::Internal, LocaleTag::En) => {
            "Sorry, something went wrong on my side. Please try again."
        }
        (FailureKind::Internal, LocaleTag::Es) => {
            "Lo siento, algo salió mal de mi lado. Inténtalo de nuevo."
        }
    }
}
