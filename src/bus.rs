use tokio::sync::mpsc;

/// Bounded queue with backpressure.
/// `T` must be `Send` because we hop across tasks.
///
/// `send` waits for space instead of dropping: when the consumer falls
/// behind, the producer stops pulling bytes and overflow sits in the OS
/// serial receive buffer. Every message sent is delivered, in send order.
#[derive(Debug, Clone)]
pub struct Sender<T> {
    tx: mpsc::Sender<T>,
}

pub type Receiver<T> = mpsc::Receiver<T>;

pub fn bounded<T: Send + 'static>(capacity: usize) -> (Sender<T>, Receiver<T>) {
    let (tx, rx) = mpsc::channel(capacity);
    (Sender { tx }, rx)
}

impl<T: Send + 'static> Sender<T> {
    /// Deliver a message, waiting if the queue is full.
    ///
    /// A closed receiver means the consumer is gone (shutdown); the message
    /// is dropped silently in that case.
    pub async fn send(&self, msg: T) {
        let _ = self.tx.send(msg).await;
    }
}
