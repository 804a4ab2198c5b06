// src/models/payment.rs

use serde::{Deserialize, Serialize};

// Resposta do GET /payment/getPayment?id=: a URL de redirecionamento do
// Mercado Pago que a UI abre em pop-up. Depois que o pop-up fecha, quem
// embarca o fluxo reconsulta o status do pedido.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRedirect {
    pub url: String,
}
