//! Translations for the survey chrome (titles, buttons, hints).
//!
//! Question texts live in the catalog; this table only covers the strings
//! the UI itself renders. Keys missing in a language fall back to English,
//! and a key missing everywhere is returned as-is so gaps are visible on
//! screen instead of rendering blank.

use crate::catalog::Locale;

const EN: &[(&str, &str)] = &[
    ("survey.title", "Real Data on Common Symptoms: Will You Join?"),
    (
        "survey.description",
        "Your experience can help us better understand the most frequent symptoms. It only takes 2 minutes!",
    ),
    ("survey.language", "Language"),
    ("survey.question", "Question"),
    ("survey.select_placeholder", "Select an option..."),
    ("survey.required", "This question needs an answer"),
    ("survey.submit", "Submit"),
    ("survey.submitting", "Submitting..."),
    ("survey.incomplete", "Answer every question to enable Submit"),
    ("survey.no_questions", "No questions to show."),
    ("survey.response_title", "Thank you"),
    (
        "survey.submit_failed",
        "We could not send your answers. Your responses are kept, please try again.",
    ),
    ("picker.title", "Choose a language"),
    ("hint.form", "Tab/↑↓:move  ←→:choose  Enter/^S:submit  ^L:language  Esc:quit"),
    ("hint.picker", "↑↓:choose  Enter:apply  Esc:cancel"),
    ("hint.dismiss", "Press Enter or Esc to dismiss"),
    ("dialog.error", "Error"),
];

const ES: &[(&str, &str)] = &[
    ("survey.title", "Datos Reales Sobre Síntomas Comunes: ¿Te Sumarías?"),
    (
        "survey.description",
        "Tu experiencia puede ayudar a comprender mejor los síntomas más frecuentes. ¡Solo toma 2 minutos!",
    ),
    ("survey.language", "Idioma"),
    ("survey.question", "Pregunta"),
    ("survey.select_placeholder", "Selecciona una opción..."),
    ("survey.required", "Esta pregunta necesita una respuesta"),
    ("survey.submit", "Enviar"),
    ("survey.submitting", "Enviando..."),
    ("survey.incomplete", "Responde todas las preguntas para poder enviar"),
    ("survey.no_questions", "No hay preguntas para mostrar."),
    ("survey.response_title", "Gracias"),
    (
        "survey.submit_failed",
        "No pudimos enviar tus respuestas. Se conservaron, inténtalo de nuevo.",
    ),
    ("picker.title", "Elige un idioma"),
    ("hint.form", "Tab/↑↓:mover  ←→:elegir  Enter/^S:enviar  ^L:idioma  Esc:salir"),
    ("hint.picker", "↑↓:elegir  Enter:aplicar  Esc:cancelar"),
    ("hint.dismiss", "Pulsa Enter o Esc para cerrar"),
    ("dialog.error", "Error"),
];

fn table(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => EN,
        Locale::Es => ES,
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Translate `key` into `locale`
pub fn t(locale: Locale, key: &'static str) -> &'static str {
    lookup(table(locale), key)
        .or_else(|| lookup(EN, key))
        .unwrap_or(key)
}
