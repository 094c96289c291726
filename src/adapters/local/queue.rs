use crate::domain::jobs::ConcatJob;
use crate::ports::queue::{JobQueuePort, QueueClosed};
use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex, RwLock};

/// In-process job queue. Workers share the receiving end, so each job is
/// handed to exactly one of them.
///
/// The queue closes from the sending side: once the sender is dropped,
/// waiting workers drain what is queued and then see `None`.
#[derive(Debug)]
pub struct ChannelQueue {
    sender: RwLock<Option<mpsc::UnboundedSender<ConcatJob>>>,
    receiver: Mutex<mpsc::UnboundedReceiver<ConcatJob>>,
}

impl ChannelQueue {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender: RwLock::new(Some(sender)),
            receiver: Mutex::new(receiver),
        }
    }

    /// Stop accepting jobs. Workers drain what is queued, then stop.
    pub async fn close(&self) {
        self.sender.write().await.take();
    }
}

impl Default for ChannelQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobQueuePort for ChannelQueue {
    async fn enqueue_job(&self, job: ConcatJob) -> Result<(), QueueClosed> {
        match self.sender.read().await.as_ref() {
            Some(sender) => sender.send(job).map_err(|_| QueueClosed),
            None => Err(QueueClosed),
        }
    }

    async fn dequeue_job(&self) -> Option<ConcatJob> {
        self.receiver.lock().await.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn job(id: &str) -> ConcatJob {
        ConcatJob {
            id: id.to_string(),
            video_ids: vec![],
            inputs: vec![],
        }
    }

    #[tokio::test]
    async fn test_fifo_order() {
        let queue = ChannelQueue::new();
        queue.enqueue_job(job("1")).await.unwrap();
        queue.enqueue_job(job("2")).await.unwrap();

        assert_eq!(queue.dequeue_job().await.unwrap().id, "1");
        assert_eq!(queue.dequeue_job().await.unwrap().id, "2");
    }

    #[tokio::test]
    async fn test_close_drains_then_ends() {
        let queue = ChannelQueue::new();
        queue.enqueue_job(job("1")).await.unwrap();
        queue.close().await;

        assert!(queue.enqueue_job(job("2")).await.is_err());
        assert_eq!(queue.dequeue_job().await.unwrap().id, "1");
        assert!(queue.dequeue_job().await.is_none());
    }

    #[tokio::test]
    async fn test_close_wakes_idle_worker() {
        let queue = Arc::new(ChannelQueue::new());
        let waiting = {
            let queue = queue.clone();
            tokio::spawn(async move { queue.dequeue_job().await })
        };
        // Let the worker park on the empty queue while holding the receiver.
        tokio::time::sleep(Duration::from_millis(20)).await;

        tokio::time::timeout(Duration::from_secs(2), queue.close())
            .await
            .expect("close blocked on a waiting worker");
        let next = tokio::time::timeout(Duration::from_secs(2), waiting)
            .await
            .expect("worker did not wake up")
            .unwrap();
        assert!(next.is_none());
    }

    #[tokio::test]
    async fn test_close_with_several_idle_workers() {
        let queue = Arc::new(ChannelQueue::new());
        let workers: Vec<_> = (0..3)
            .map(|_| {
                let queue = queue.clone();
                tokio::spawn(async move { queue.dequeue_job().await })
            })
            .collect();
        tokio::time::sleep(Duration::from_millis(20)).await;

        queue.close().await;

        for worker in workers {
            let next = tokio::time::timeout(Duration::from_secs(2), worker)
                .await
                .unwrap()
                .unwrap();
            assert!(next.is_none());
        }
    }
}
