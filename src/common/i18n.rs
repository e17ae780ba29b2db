// src/common/i18n.rs

use std::collections::HashMap;

/// Catálogo de mensagens de erro voltadas ao usuário final.
/// As chaves são as de `AppError::message_key`; os idiomas vêm do
/// extrator `Locale` (Accept-Language).
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

const FALLBACK_LANG: &str = "en";

impl I18nStore {
    pub fn new() -> Self {
        let mut messages: HashMap<&'static str, HashMap<&'static str, &'static str>> =
            HashMap::new();

        let mut en = HashMap::new();
        en.insert("validation", "One or more fields are invalid.");
        en.insert("email_already_exists", "This e-mail is already in use.");
        en.insert("invalid_credentials", "Invalid e-mail or password.");
        en.insert("invalid_token", "Missing or invalid authentication token.");
        en.insert("user_not_found", "User not found.");
        en.insert("tenant_not_found", "Community '{}' not found.");
        en.insert("tenant_already_exists", "The community '{}' already exists.");
        en.insert("member_not_found", "Member not found.");
        en.insert("post_not_found", "Post not found.");
        en.insert("event_not_found", "Event not found.");
        en.insert("broadcast_not_found", "Broadcast not found.");
        en.insert("broadcast_already_sent", "This broadcast was already sent.");
        en.insert("no_recipients", "No member of this community has an e-mail address.");
        en.insert("mailer_not_configured", "E-mail delivery is not configured.");
        en.insert("feature_disabled", "The '{}' module is disabled for this community.");
        en.insert("unique_violation", "A record with this value already exists: {}");
        en.insert("internal", "An unexpected error occurred.");
        messages.insert("en", en);

        let mut pt = HashMap::new();
        pt.insert("validation", "Um ou mais campos são inválidos.");
        pt.insert("email_already_exists", "Este e-mail já está em uso.");
        pt.insert("invalid_credentials", "E-mail ou senha inválidos.");
        pt.insert("invalid_token", "Token de autenticação inválido ou ausente.");
        pt.insert("user_not_found", "Usuário não encontrado.");
        pt.insert("tenant_not_found", "Comunidade '{}' não encontrada.");
        pt.insert("tenant_already_exists", "A comunidade '{}' já existe.");
        pt.insert("member_not_found", "Membro não encontrado.");
        pt.insert("post_not_found", "Publicação não encontrada.");
        pt.insert("event_not_found", "Evento não encontrado.");
        pt.insert("broadcast_not_found", "Comunicado não encontrado.");
        pt.insert("broadcast_already_sent", "Este comunicado já foi enviado.");
        pt.insert("no_recipients", "Nenhum membro desta comunidade tem e-mail cadastrado.");
        pt.insert("mailer_not_configured", "O envio de e-mails não está configurado.");
        pt.insert("feature_disabled", "O módulo '{}' está desligado nesta comunidade.");
        pt.insert("unique_violation", "Já existe um registro com este valor: {}");
        pt.insert("internal", "Ocorreu um erro inesperado.");
        messages.insert("pt", pt);

        Self { messages }
    }

    /// Busca a mensagem para (idioma, chave). Idioma desconhecido cai para
    /// inglês; chave desconhecida devolve a própria chave (melhor um código
    /// cru no cliente do que um 500).
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(lang)
            .and_then(|m| m.get(key))
            .or_else(|| {
                self.messages
                    .get(FALLBACK_LANG)
                    .and_then(|m| m.get(key))
            })
            .map(|s| s.to_string())
            .unwrap_or_else(|| key.to_string())
    }

    /// Igual a `translate`, mas substitui o placeholder `{}` pelo argumento.
    pub fn translate_with(&self, lang: &str, key: &str, arg: &str) -> String {
        self.translate(lang, key).replace("{}", arg)
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_english() {
        let store = I18nStore::new();
        assert_eq!(
            store.translate("de", "user_not_found"),
            "User not found."
        );
    }

    #[test]
    fn unknown_key_returns_the_key_itself() {
        let store = I18nStore::new();
        assert_eq!(store.translate("en", "nao_existe"), "nao_existe");
    }

    #[test]
    fn placeholder_is_substituted() {
        let store = I18nStore::new();
        assert_eq!(
            store.translate_with("pt", "tenant_not_found", "acme"),
            "Comunidade 'acme' não encontrada."
        );
    }
}
