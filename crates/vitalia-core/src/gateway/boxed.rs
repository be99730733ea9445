//! BoxAssistantGateway -- type-erased wrapper for [`AssistantGateway`].
//!
//! Panels hold a `BoxAssistantGateway` so they need not be generic over
//! the concrete client, and tests can substitute scripted gateways.

use vitalia_types::assistant::AssistantRequest;

use super::port::{AssistantGateway, EventStream};

/// Type-erased assistant gateway.
pub struct BoxAssistantGateway {
    inner: Box<dyn AssistantGateway>,
}

impl BoxAssistantGateway {
    /// Wrap a concrete gateway in a type-erased box.
    pub fn new<T: AssistantGateway + 'static>(gateway: T) -> Self {
        Self {
            inner: Box::new(gateway),
        }
    }

    /// Human-readable gateway name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Send a streaming request to the named edge function.
    pub fn stream(&self, endpoint: &str, request: AssistantRequest) -> EventStream {
        self.inner.stream(endpoint, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use vitalia_types::assistant::StreamEvent;

    struct EchoGateway;

    impl AssistantGateway for EchoGateway {
        fn name(&self) -> &str {
            "echo"
        }

        fn stream(&self, _endpoint: &str, request: AssistantRequest) -> EventStream {
            Box::pin(futures_util::stream::iter(vec![
                Ok(StreamEvent::Connected),
                Ok(StreamEvent::TextDelta {
                    text: request.query,
                }),
                Ok(StreamEvent::Done),
            ]))
        }
    }

    #[tokio::test]
    async fn test_boxed_gateway_delegates() {
        let gateway = BoxAssistantGateway::new(EchoGateway);
        assert_eq!(gateway.name(), "echo");

        let events: Vec<_> = gateway
            .stream("health-assistant", AssistantRequest::new("hi"))
            .collect()
            .await;
        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[1],
            Ok(StreamEvent::TextDelta { ref text }) if text == "hi"
        ));
    }
}
