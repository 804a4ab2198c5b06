use serde_json::Value;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// O `Display` de cada variante já é a mensagem que a camada de UI mostra
// no toast; o erro bruto vai para o log via `tracing`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail ou senha inválidos.")]
    InvalidCredentials,

    #[error("Token de autenticação inválido ou ausente.")]
    InvalidToken,

    #[error("Faça login antes de continuar.")]
    NotAuthenticated,

    // Mensagem já normalizada vinda do backend (ver `from_backend`).
    #[error("{0}")]
    Backend(String),

    #[error("Falha de comunicação com o servidor.")]
    Request(#[from] reqwest::Error),

    #[error("Resposta inesperada do servidor.")]
    UnexpectedResponse(#[from] serde_json::Error),

    #[error("Preencha o passo atual antes de avançar.")]
    StepInvalid,

    #[error("Complete os passos anteriores antes de pular para este.")]
    PreviousStepsInvalid,

    #[error("O pedido precisa de pelo menos um item.")]
    EmptyOrder,

    #[error("Já existe um envio em andamento, aguarde.")]
    SubmissionInFlight,

    #[error("Data ou horário do evento em formato inválido.")]
    InvalidEventTime,

    #[error("Número de convidados inválido.")]
    InvalidGuestCount,

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Ocorreu um erro inesperado.")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    // ---
    // Normalização de erros do backend
    // ---
    // O backend responde erros em formatos diferentes dependendo da rota:
    // `{"error": "..."}`, `{"message": "..."}`, `{"detail": "..."}` ou a
    // lista estruturada `{"detail": [{"msg": ...}, ...]}`. Aqui tudo vira
    // UMA string legível para o usuário; quem chama loga o corpo bruto.
    pub fn from_backend(status: u16, body: &str) -> Self {
        if let Ok(value) = serde_json::from_str::<Value>(body) {
            for key in ["error", "message"] {
                if let Some(msg) = value.get(key).and_then(Value::as_str) {
                    return AppError::Backend(msg.to_string());
                }
            }

            match value.get("detail") {
                Some(Value::String(msg)) => return AppError::Backend(msg.clone()),
                Some(Value::Array(entries)) => {
                    let msgs: Vec<String> = entries
                        .iter()
                        .filter_map(|e| e.get("msg").and_then(Value::as_str))
                        .map(str::to_string)
                        .collect();
                    if !msgs.is_empty() {
                        return AppError::Backend(msgs.join("; "));
                    }
                }
                _ => {}
            }
        }

        // Sem corpo aproveitável: cai para o texto do status HTTP.
        let trimmed = body.trim();
        if !trimmed.is_empty() && trimmed.len() <= 200 {
            return AppError::Backend(trimmed.to_string());
        }
        AppError::Backend(format!("Erro {status} do servidor."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normaliza_campo_error_simples() {
        let err = AppError::from_backend(409, r#"{"error": "Este e-mail já está em uso."}"#);
        assert_eq!(err.to_string(), "Este e-mail já está em uso.");
    }

    #[test]
    fn normaliza_detail_como_string() {
        let err = AppError::from_backend(401, r#"{"detail": "Credenciais incorretas"}"#);
        assert_eq!(err.to_string(), "Credenciais incorretas");
    }

    #[test]
    fn normaliza_lista_estruturada_de_detail() {
        let body = r#"{"detail": [{"loc": ["body", "name"], "msg": "campo obrigatório"},
                                   {"loc": ["body", "date"], "msg": "data inválida"}]}"#;
        let err = AppError::from_backend(422, body);
        assert_eq!(err.to_string(), "campo obrigatório; data inválida");
    }

    #[test]
    fn corpo_vazio_vira_texto_do_status() {
        let err = AppError::from_backend(500, "");
        assert_eq!(err.to_string(), "Erro 500 do servidor.");
    }

    #[test]
    fn corpo_gigante_nao_vaza_para_o_usuario() {
        let body = "x".repeat(5000);
        let err = AppError::from_backend(502, &body);
        assert_eq!(err.to_string(), "Erro 502 do servidor.");
    }

    #[test]
    fn texto_curto_sem_json_e_reaproveitado() {
        let err = AppError::from_backend(503, "Servidor em manutenção");
        assert_eq!(err.to_string(), "Servidor em manutenção");
    }
}
