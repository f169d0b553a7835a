//! One method per simulator endpoint.

use crate::model::{BlockId, MemoryBlock, Process, StatsSnapshot};

use super::*;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

impl SimulatorClient {
    pub async fn memory_blocks(&self) -> Result<Vec<MemoryBlock>, RequestError> {
        const LABEL: &str = "GET /api/memory-blocks";
        let resp = self
            .send(self.client.get(self.url("/api/memory-blocks")), LABEL)
            .await?;
        Self::read_json(resp, LABEL).await
    }

    pub async fn processes(&self) -> Result<Vec<Process>, RequestError> {
        const LABEL: &str = "GET /api/processes";
        let resp = self
            .send(self.client.get(self.url("/api/processes")), LABEL)
            .await?;
        Self::read_json(resp, LABEL).await
    }

    pub async fn memory_stats(&self) -> Result<StatsSnapshot, RequestError> {
        const LABEL: &str = "GET /api/memory-stats";
        let resp = self
            .send(self.client.get(self.url("/api/memory-stats")), LABEL)
            .await?;
        Self::read_json(resp, LABEL).await
    }

    /// Lightweight reachability check against the stats endpoint.
    ///
    /// Any HTTP answer is `Ok` with its status; only a failed exchange is an
    /// error.
    pub async fn probe(&self) -> Result<reqwest::StatusCode, RequestError> {
        const LABEL: &str = "probe /api/memory-stats";
        let resp = self
            .client
            .get(self.url("/api/memory-stats"))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .map_err(|source| RequestError::Transport {
                label: LABEL,
                source,
            })?;
        Ok(resp.status())
    }

    pub async fn ram_residents(&self) -> Result<Vec<String>, RequestError> {
        const LABEL: &str = "GET /api/swap/ram";
        let resp = self
            .send(self.client.get(self.url("/api/swap/ram")), LABEL)
            .await?;
        let ids: ResidentIds = Self::read_json(resp, LABEL).await?;
        Ok(ids.0)
    }

    pub async fn swap_residents(&self) -> Result<Vec<String>, RequestError> {
        const LABEL: &str = "GET /api/swap/space";
        let resp = self
            .send(self.client.get(self.url("/api/swap/space")), LABEL)
            .await?;
        let ids: ResidentIds = Self::read_json(resp, LABEL).await?;
        Ok(ids.0)
    }

    pub async fn allocate(
        &self,
        size: u64,
        algorithm: &str,
    ) -> Result<BlocksResponse, RequestError> {
        const LABEL: &str = "POST /api/allocate";
        let req = self
            .client
            .post(self.url("/api/allocate"))
            .form(&AllocateForm { size, algorithm });
        let resp = self.send(req, LABEL).await?;
        Self::read_json(resp, LABEL).await
    }

    pub async fn deallocate(&self, block_id: BlockId) -> Result<BlocksResponse, RequestError> {
        const LABEL: &str = "POST /api/deallocate";
        let req = self
            .client
            .post(self.url("/api/deallocate"))
            .form(&DeallocateForm { block_id });
        let resp = self.send(req, LABEL).await?;
        Self::read_json(resp, LABEL).await
    }

    pub async fn reset(&self) -> Result<BlocksResponse, RequestError> {
        const LABEL: &str = "POST /api/reset";
        let resp = self
            .send(self.client.post(self.url("/api/reset")), LABEL)
            .await?;
        Self::read_json(resp, LABEL).await
    }

    pub async fn create_process(
        &self,
        name: &str,
        size: u64,
    ) -> Result<ProcessesResponse, RequestError> {
        const LABEL: &str = "POST /api/create-process";
        let req = self
            .client
            .post(self.url("/api/create-process"))
            .form(&CreateProcessForm { name, size });
        let resp = self.send(req, LABEL).await?;
        Self::read_json(resp, LABEL).await
    }

    /// Returns the backend's plain-text confirmation.
    pub async fn swap_out(&self, process_id: &str) -> Result<String, RequestError> {
        const LABEL: &str = "POST /api/swap/out";
        let req = self
            .client
            .post(self.url("/api/swap/out"))
            .query(&SwapQuery { process_id });
        let resp = self.send(req, LABEL).await?;
        Self::read_text(resp, LABEL).await
    }

    /// Returns the backend's plain-text confirmation.
    pub async fn swap_in(&self, process_id: &str) -> Result<String, RequestError> {
        const LABEL: &str = "POST /api/swap/in";
        let req = self
            .client
            .post(self.url("/api/swap/in"))
            .query(&SwapQuery { process_id });
        let resp = self.send(req, LABEL).await?;
        Self::read_text(resp, LABEL).await
    }

    pub async fn page_replacement(
        &self,
        algorithm: &str,
    ) -> Result<ReplacementResponse, RequestError> {
        const LABEL: &str = "POST /api/page-replacement";
        let req = self
            .client
            .post(self.url("/api/page-replacement"))
            .form(&AlgorithmForm { algorithm });
        let resp = self.send(req, LABEL).await?;
        Self::read_json(resp, LABEL).await
    }

    pub async fn garbage_collect(&self) -> Result<GarbageCollectResponse, RequestError> {
        const LABEL: &str = "POST /api/garbage-collect";
        let resp = self
            .send(self.client.post(self.url("/api/garbage-collect")), LABEL)
            .await?;
        Self::read_json(resp, LABEL).await
    }
}
