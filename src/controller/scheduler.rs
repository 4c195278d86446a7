//! Deferred, coalesced delivery of data-changed notifications.
//!
//! Any thread may request a data-changed fan-out through a
//! [`DeferredNotifier`]. Requests collapse on a pending flag: while one
//! delivery is queued, further requests are absorbed by it. The
//! [`ForegroundQueue`] is the single consumer and performs the fan-out on
//! whichever context drains it.
//!
//! The consumer clears the pending flag before delivering, so a request made
//! during a delivery queues a fresh one.

use crate::subscribers::{DisplayEvent, FanOutReport, SubscriberRegistry};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, error::TryRecvError};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub enum ForegroundTask {
	DataChanged,
	Shutdown,
}

/// Producer side, cheap to clone and usable from any thread.
#[derive(Debug, Clone)]
pub struct DeferredNotifier {
	pending: Arc<AtomicBool>,
	sender: UnboundedSender<ForegroundTask>,
}

impl DeferredNotifier {
	/// Request a data-changed fan-out at the next foreground opportunity.
	///
	/// Returns false when the request was absorbed by one already queued.
	pub fn request_data_changed(&self) -> bool {
		if self.pending.swap(true, Ordering::AcqRel) {
			return false;
		}
		if self.sender.send(ForegroundTask::DataChanged).is_err() {
			warn!("Foreground queue closed, dropping data changed notification");
			self.pending.store(false, Ordering::Release);
			return false;
		}
		true
	}

	/// Ask a running [`ForegroundQueue::run`] loop to stop.
	pub fn shutdown(&self) {
		if self.sender.send(ForegroundTask::Shutdown).is_err() {
			warn!("Foreground queue already closed, ignoring shutdown request");
		}
	}

	pub fn is_pending(&self) -> bool {
		self.pending.load(Ordering::Acquire)
	}
}

/// Consumer side, owned by the foreground context.
pub struct ForegroundQueue {
	pending: Arc<AtomicBool>,
	receiver: UnboundedReceiver<ForegroundTask>,
	subscribers: Arc<SubscriberRegistry>,
	stopped: bool,
}

pub fn foreground_channel(subscribers: Arc<SubscriberRegistry>) -> (DeferredNotifier, ForegroundQueue) {
	let (sender, receiver) = mpsc::unbounded_channel();
	let pending = Arc::new(AtomicBool::new(false));
	(
		DeferredNotifier {
			pending: pending.clone(),
			sender,
		},
		ForegroundQueue {
			pending,
			receiver,
			subscribers,
			stopped: false,
		},
	)
}

impl ForegroundQueue {
	/// Execute every task queued so far without waiting. Returns the number
	/// of data-changed fan-outs performed.
	///
	/// Draining stops at a shutdown request; tasks queued behind it stay
	/// queued and a later [`run`](Self::run) returns at once.
	pub fn drain_pending(&mut self) -> usize {
		let mut delivered = 0;
		while !self.stopped {
			match self.receiver.try_recv() {
				Ok(ForegroundTask::DataChanged) => {
					self.deliver_data_changed();
					delivered += 1;
				}
				Ok(ForegroundTask::Shutdown) => {
					debug!("Shutdown requested while draining");
					self.stopped = true;
				}
				Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
			}
		}
		delivered
	}

	/// Run until shutdown is requested or every notifier is dropped.
	pub async fn run(mut self) -> usize {
		let mut delivered = 0;
		if self.stopped {
			info!("Foreground queue already stopped");
			return delivered;
		}
		while let Some(task) = self.receiver.recv().await {
			match task {
				ForegroundTask::DataChanged => {
					self.deliver_data_changed();
					delivered += 1;
				}
				ForegroundTask::Shutdown => break,
			}
		}
		info!("Foreground queue stopped after {} data changed deliveries", delivered);
		delivered
	}

	pub fn is_stopped(&self) -> bool {
		self.stopped
	}

	fn deliver_data_changed(&self) -> FanOutReport {
		// Acquire pairs with the requester's swap so its writes are visible
		self.pending.swap(false, Ordering::AcqRel);
		self.subscribers.notify_all_displays(&DisplayEvent::DataChanged)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::RecordingSubscriber;

	fn setup() -> (DeferredNotifier, ForegroundQueue, Arc<RecordingSubscriber>) {
		let subscribers = Arc::new(SubscriberRegistry::new());
		let recorder = RecordingSubscriber::new("recorder");
		subscribers.register_display(recorder.clone());
		let (notifier, queue) = foreground_channel(subscribers);
		(notifier, queue, recorder)
	}

	#[test]
	fn test_requests_coalesce() {
		let (notifier, mut queue, recorder) = setup();
		assert!(notifier.request_data_changed());
		for _ in 0..99 {
			assert!(!notifier.request_data_changed());
		}
		assert!(notifier.is_pending());
		assert!(recorder.kinds().is_empty());

		assert_eq!(queue.drain_pending(), 1);
		assert_eq!(recorder.kinds(), vec!["data_changed"]);
		assert!(!notifier.is_pending());
	}

	#[test]
	fn test_request_after_delivery_is_delivered_again() {
		let (notifier, mut queue, recorder) = setup();
		notifier.request_data_changed();
		queue.drain_pending();
		notifier.request_data_changed();
		assert_eq!(queue.drain_pending(), 1);
		assert_eq!(recorder.kinds().len(), 2);
		assert_eq!(queue.drain_pending(), 0);
	}

	#[test]
	fn test_requests_from_many_threads() {
		let (notifier, mut queue, recorder) = setup();
		let threads: Vec<_> = (0..4)
			.map(|_| {
				let notifier = notifier.clone();
				std::thread::spawn(move || {
					for _ in 0..1000 {
						notifier.request_data_changed();
					}
				})
			})
			.collect();
		for thread in threads {
			thread.join().unwrap();
		}
		queue.drain_pending();
		let delivered = recorder.kinds().len();
		assert!(delivered >= 1);
		assert!(delivered < 4000);
	}

	#[test]
	fn test_closed_queue_drops_request() {
		let (notifier, queue, _recorder) = setup();
		drop(queue);
		assert!(!notifier.request_data_changed());
		assert!(!notifier.is_pending());
	}

	#[tokio::test]
	async fn test_run_until_shutdown() {
		let (notifier, queue, recorder) = setup();
		let task = tokio::spawn(queue.run());
		notifier.request_data_changed();
		notifier.shutdown();
		let delivered = task.await.unwrap();
		assert_eq!(delivered, 1);
		assert_eq!(recorder.kinds(), vec!["data_changed"]);
	}

	#[tokio::test]
	async fn test_shutdown_seen_while_draining_stops_run() {
		let (notifier, mut queue, recorder) = setup();
		notifier.request_data_changed();
		notifier.shutdown();
		assert_eq!(queue.drain_pending(), 1);
		assert!(queue.is_stopped());

		notifier.request_data_changed();
		assert_eq!(queue.drain_pending(), 0);
		assert_eq!(queue.run().await, 0);
		assert_eq!(recorder.kinds(), vec!["data_changed"]);
	}

	#[test]
	fn test_shutdown_after_queue_dropped() {
		let (notifier, queue, _recorder) = setup();
		drop(queue);
		notifier.shutdown();
	}
}
